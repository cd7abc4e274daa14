//! Overlay rendering (preview editor, notification toast, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{Notification, PreviewDocument, Severity};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_preview(frame: &mut Frame, doc: &PreviewDocument, sending: bool) {
    let area = frame.area();
    let popup_area = centered(
        area,
        area.width.saturating_sub(6).max(20),
        area.height.saturating_sub(4).max(8),
    );

    frame.render_widget(Clear, popup_area);

    let mut title = format!(" {} - {} ", doc.song, doc.artist);
    if doc.header_defaulted {
        title.push_str("(unverified) ");
    }

    let (footer, border_color) = if sending {
        (" Sending to Google Drive... ", Color::Yellow)
    } else {
        (" Ctrl+S send to Google Drive • Esc close ", Color::Cyan)
    };

    // Trailing cursor so the edit position is visible
    let mut text = doc.content.clone();
    if !sending {
        text.push('▏');
    }

    // Keep the end of the document in view while editing long charts
    let inner_height = popup_area.height.saturating_sub(2);
    let line_count = text.lines().count() as u16 + u16::from(text.ends_with('\n'));
    let scroll = line_count.saturating_sub(inner_height);

    let editor = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .style(Style::default().fg(if sending { Color::DarkGray } else { Color::White }))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(title)
                .title_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD))
                .title_bottom(Line::from(footer).right_aligned())
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(editor, popup_area);
}

pub fn render_notification(frame: &mut Frame, notification: &Notification) {
    let area = frame.area();

    let color = match notification.severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;
    let line_count = notification.message.chars().count().div_ceil(inner_width).max(1) as u16;
    let popup_height = (2 + line_count).min(area.height.saturating_sub(2));

    // Top-right corner, clear of the page tabs
    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width + 1),
        y: 1,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let toast = Paragraph::new(notification.message.as_str())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} (Esc to dismiss) ", notification.severity.label()))
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(toast, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = [
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Switch page"),
        ("↑ / ↓", "Move selection / field"),
        ("", ""),
        ("", "── Search ──"),
        ("type", "Search (3+ characters)"),
        ("Enter", "Get OnSong format"),
        ("Esc", "Clear search"),
        ("", ""),
        ("", "── Tab ID / Manual ──"),
        ("Enter", "Fetch tab by ID"),
        ("Ctrl+S", "Format manual entry"),
        ("", ""),
        ("", "── Preview ──"),
        ("type", "Edit content"),
        ("Ctrl+S", "Send to Google Drive"),
        ("Esc", "Close preview"),
        ("", ""),
        ("", "── General ──"),
        ("Esc", "Dismiss notification"),
        ("F1", "Toggle this help"),
        ("Ctrl+Q", "Quit"),
    ];

    let popup_area = centered(area, 52, (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4)));

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^48}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (F1 or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help_text, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn doc(header_defaulted: bool) -> PreviewDocument {
        PreviewDocument {
            song: "Oceans".into(),
            artist: "Hillsong United".into(),
            id: "1234".into(),
            content: "{title: Oceans}\n[G]You call me out".into(),
            is_manual: false,
            header_defaulted,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn preview_title_marks_guessed_header() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render_preview(f, &doc(true), false)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Oceans - Hillsong United (unverified)"));
        assert!(text.contains("Ctrl+S send to Google Drive"));
    }

    #[test]
    fn preview_shows_sending_state() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render_preview(f, &doc(false), true)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Sending to Google Drive..."));
        assert!(!text.contains("(unverified)"));
    }

    #[test]
    fn notification_shows_severity_and_message() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let notification = Notification {
            message: "Failed to search".into(),
            severity: Severity::Error,
        };
        terminal.draw(|f| render_notification(f, &notification)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Error (Esc to dismiss)"));
        assert!(text.contains("Failed to search"));
    }
}

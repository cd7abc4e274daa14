//! Layout rendering (top bar, page tabs, key hints)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{Page, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Title
            Constraint::Length(22), // Backend status
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("♪ Chord Scraper", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(
            "  Search Ultimate Guitar tabs • Convert to OnSong format",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(title, chunks[0]);

    let (status, color) = match ui_state.backend_healthy {
        Some(true) => ("● online", Color::Green),
        Some(false) => ("● offline", Color::Red),
        None => ("○ checking...", Color::DarkGray),
    };
    let backend = Paragraph::new(status)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Backend "));
    frame.render_widget(backend, chunks[1]);
}

pub fn render_page_tabs(frame: &mut Frame, area: Rect, active: Page) {
    let spans: Vec<Span> = Page::ALL
        .iter()
        .flat_map(|page| {
            let style = if *page == active {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![Span::styled(format!(" {} ", page.title()), style), Span::raw("  ")]
        })
        .collect();

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tab / Shift+Tab to switch "),
    );
    frame.render_widget(tabs, area);
}

pub fn render_key_hints(frame: &mut Frame, area: Rect, active: Page) {
    let hints = match active {
        Page::Search => " Type to search  ↑/↓ select  Enter get OnSong format  F1 help  Ctrl+Q quit",
        Page::TabById => " Type a tab ID  Enter fetch  Esc clear  F1 help  Ctrl+Q quit",
        Page::Manual => " ↑/↓ switch field  Ctrl+S preview format  F1 help  Ctrl+Q quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

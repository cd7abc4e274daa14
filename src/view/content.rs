//! Page bodies (search results, tab-by-ID form, manual submission form)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ManualField, SearchState, UiState, MIN_QUERY_LEN, UNKNOWN_ARTIST, UNKNOWN_SONG};
use super::utils::{calculate_num_width, format_rating, or_placeholder, render_scrollable_list, truncate_string};

const FOCUSED: Style = Style::new().fg(Color::Green);

pub fn render_search_page(frame: &mut Frame, area: Rect, search: &SearchState, fetching: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Length(1), // Caption
            Constraint::Min(0),    // Results list
        ])
        .split(area);

    let search_text = if search.query.is_empty() {
        format!("Search for a song... (type at least {} characters)", MIN_QUERY_LEN)
    } else {
        format!("{}▏", search.query)
    };
    let input = Paragraph::new(search_text)
        .style(if search.query.is_empty() { Style::default().fg(Color::DarkGray) } else { FOCUSED })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(FOCUSED),
        );
    frame.render_widget(input, chunks[0]);

    let caption = if fetching {
        Span::styled(" Fetching OnSong format...", Style::default().fg(Color::Yellow))
    } else if !search.results.is_empty() && !search.loading {
        Span::styled(" ★ Sorted by highest rating first", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };
    frame.render_widget(Paragraph::new(Line::from(caption)), chunks[1]);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results ({}) ", search.results.len()))
        .padding(Padding::horizontal(1));

    if search.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(list_block);
        frame.render_widget(loading, chunks[2]);
        return;
    }

    if search.results.is_empty() {
        let empty = Paragraph::new("No results")
            .style(Style::default().fg(Color::DarkGray))
            .block(list_block);
        frame.render_widget(empty, chunks[2]);
        return;
    }

    let content_width = chunks[2].width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(search.results.len());
    let type_width = 12;
    let rating_width = 6;
    let fixed_width = 1 + num_width + 3 + 3 + 3 + type_width + 3 + rating_width;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let song_width = (remaining_width * 55) / 100;
    let artist_width = remaining_width.saturating_sub(song_width);

    // Header row first, so the selected index is offset by one
    let mut items = vec![ListItem::new(format!(
        " {:<num_width$}   {:<song_width$}   {:<artist_width$}   {:<type_width$}   {:>rating_width$}",
        "#", "Song", "Artist", "Type", "Rating",
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))];

    items.extend(search.results.iter().enumerate().map(|(i, result)| {
        let style = if i == search.selected {
            FOCUSED.add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        ListItem::new(format!(
            " {:<num_width$}   {}   {}   {}   {:>rating_width$}",
            i + 1,
            truncate_string(or_placeholder(&result.song, UNKNOWN_SONG), song_width),
            truncate_string(or_placeholder(&result.artist, UNKNOWN_ARTIST), artist_width),
            truncate_string(or_placeholder(&result.tab_type, "Unknown"), type_width),
            format_rating(result.rating),
        ))
        .style(style)
    }));

    render_scrollable_list(frame, chunks[2], items, search.selected + 1, list_block.border_style(FOCUSED));
}

pub fn render_tab_id_page(frame: &mut Frame, area: Rect, ui_state: &UiState, fetching: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Explanation
            Constraint::Length(3), // Input
            Constraint::Min(0),
        ])
        .split(area);

    let help = Paragraph::new(vec![
        Line::from("Enter an Ultimate Guitar tab ID to fetch directly. You can find the ID in the Ultimate Guitar URL."),
        Line::from(Span::styled(
            "Example: for https://tabs.ultimate-guitar.com/tab/1234567 the ID is 1234567",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(help, chunks[0]);

    let title = if fetching { " Tab ID (fetching...) " } else { " Tab ID " };
    let input = Paragraph::new(format!("{}▏", ui_state.tab_id_input))
        .style(FOCUSED)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding::horizontal(1))
                .border_style(FOCUSED),
        );
    frame.render_widget(input, chunks[1]);
}

pub fn render_manual_page(frame: &mut Frame, area: Rect, ui_state: &UiState, formatting: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Explanation
            Constraint::Length(3), // Song
            Constraint::Length(3), // Artist
            Constraint::Min(5),    // Content
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new("Submit raw chord text directly. Artist is optional (defaults to \"Unknown Artist\").")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    let fields = [
        (ManualField::Song, " Song Title ", &ui_state.manual_song, chunks[1]),
        (ManualField::Artist, " Artist Name (optional) ", &ui_state.manual_artist, chunks[2]),
        (ManualField::Content, " Chord Content ", &ui_state.manual_content, chunks[3]),
    ];

    for (field, title, value, area) in fields {
        let focused = ui_state.manual_focus == field;
        let title = if field == ManualField::Content && formatting {
            " Chord Content (formatting...) ".to_string()
        } else {
            title.to_string()
        };
        let text = if focused { format!("{}▏", value) } else { value.clone() };
        let widget = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1))
                    .border_style(if focused { FOCUSED } else { Style::default() }),
            );
        frame.render_widget(widget, area);
    }
}

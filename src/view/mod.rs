//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, page tabs)
//! - `content`: Page bodies (search results, tab-by-ID form, manual form)
//! - `overlays`: Modal overlays (preview, notification, help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{Notification, Page, PreviewState, SearchState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        search: &SearchState,
        preview: &PreviewState,
        notification: Option<&Notification>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + backend status
                Constraint::Length(3), // Page tabs
                Constraint::Min(0),    // Page body
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state);
        layout::render_page_tabs(frame, chunks[1], ui_state.active_page);

        match ui_state.active_page {
            Page::Search => content::render_search_page(frame, chunks[2], search, preview.is_acquiring()),
            Page::TabById => content::render_tab_id_page(frame, chunks[2], ui_state, preview.is_acquiring()),
            Page::Manual => content::render_manual_page(frame, chunks[2], ui_state, preview.is_acquiring()),
        }

        layout::render_key_hints(frame, chunks[3], ui_state.active_page);

        if let Some(doc) = preview.document() {
            overlays::render_preview(frame, doc, preview.is_sending());
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Notifications draw last so they stay visible above the preview
        if let Some(notification) = notification {
            overlays::render_notification(frame, notification);
        }
    }
}

//! Main application model with state management

use std::time::Instant;
use tokio::sync::Mutex;

use super::notification::{Notification, NotificationSink, Severity};
use super::preview::PreviewState;
use super::search::SearchState;
use super::types::{Page, UiState};

/// Main application model containing all state.
///
/// Each slot has its own lock; controllers are the only writers.
#[derive(Default)]
pub struct AppModel {
    pub ui_state: Mutex<UiState>,
    pub search: Mutex<SearchState>,
    pub preview: Mutex<PreviewState>,
    pub notifications: Mutex<NotificationSink>,
    should_quit: Mutex<bool>,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn active_page(&self) -> Page {
        self.ui_state.lock().await.active_page
    }

    pub async fn cycle_page_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_page = state.active_page.next();
    }

    pub async fn cycle_page_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_page = state.active_page.prev();
    }

    pub async fn set_backend_healthy(&self, healthy: bool) {
        self.ui_state.lock().await.backend_healthy = Some(healthy);
    }

    pub async fn toggle_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = !state.show_help_popup;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub async fn get_search_state(&self) -> SearchState {
        self.search.lock().await.clone()
    }

    pub async fn search_query(&self) -> String {
        self.search.lock().await.query.clone()
    }

    // ========================================================================
    // Preview
    // ========================================================================

    pub async fn get_preview_state(&self) -> PreviewState {
        self.preview.lock().await.clone()
    }

    pub async fn is_preview_visible(&self) -> bool {
        self.preview.lock().await.is_visible()
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub async fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.notifications.lock().await.push(message, severity);
    }

    pub async fn dismiss_notification(&self) -> bool {
        let mut sink = self.notifications.lock().await;
        let had = sink.current().is_some();
        sink.dismiss();
        had
    }

    pub async fn expire_notifications(&self) {
        self.notifications.lock().await.expire(Instant::now());
    }

    pub async fn current_notification(&self) -> Option<Notification> {
        self.notifications.lock().await.current().cloned()
    }
}

//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input and
//! drives every backend call. Controllers are the only writers of model state.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Debounced search with stale-response suppression
//! - `acquisition`: The three ways of getting a tab into the preview
//! - `submission`: Preview editing, closing and sending

mod input;
mod search;
mod acquisition;
mod submission;

use std::sync::Arc;
use std::time::Duration;

use crate::debounce::Debouncer;
use crate::model::{ApiError, AppModel, ChordClient, Severity};

/// Tunables the controller needs from the configuration
#[derive(Clone, Debug)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub requires_automation: Option<bool>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            requires_automation: None,
        }
    }
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) client: ChordClient,
    pub(crate) settings: ControllerSettings,
    search_debouncer: Arc<Debouncer>,
}

impl AppController {
    pub fn new(model: Arc<AppModel>, client: ChordClient, settings: ControllerSettings) -> Self {
        Self {
            model,
            client,
            settings,
            search_debouncer: Arc::new(Debouncer::new()),
        }
    }

    /// Report a failed call as a single error notification
    pub(crate) async fn notify_failure(&self, error: &ApiError, fallback: &str) {
        tracing::debug!(kind = ?error.kind(), error = %error, "Reporting failure");
        self.model
            .notify(error.user_message(fallback), Severity::Error)
            .await;
    }

    pub async fn check_health(&self) -> bool {
        let healthy = self.client.health().await;
        tracing::debug!(healthy, "Backend health checked");
        self.model.set_backend_healthy(healthy).await;
        healthy
    }

    /// Poll backend health forever at `interval`
    pub fn spawn_health_monitor(&self, interval: Duration) {
        let controller = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if controller.model.should_quit().await {
                    break;
                }
                controller.check_health().await;
            }
        });
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn health_updates_ui_state_without_notifying() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let controller = controller(&server);
        assert!(!controller.check_health().await);
        assert_eq!(controller.model.get_ui_state().await.backend_healthy, Some(false));
        assert!(notification(&controller).await.is_none());
    }
}

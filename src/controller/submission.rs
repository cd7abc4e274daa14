//! Preview editing and submission

use crate::model::{SendOutcome, Severity};
use super::AppController;

impl AppController {
    pub async fn edit_preview_push(&self, c: char) {
        self.model.preview.lock().await.edit_content(|content| content.push(c));
    }

    pub async fn edit_preview_backspace(&self) {
        self.model.preview.lock().await.edit_content(|content| {
            content.pop();
        });
    }

    /// Close without sending. Also cancels any acquisition still in flight.
    pub async fn close_preview(&self) {
        if self.model.preview.lock().await.close() {
            tracing::debug!("Preview closed");
        }
    }

    /// Send the previewed document. Ignored unless the preview is open and idle.
    pub async fn send_preview(&self) {
        let Some((session, request)) = self
            .model
            .preview
            .lock()
            .await
            .begin_send(self.settings.requires_automation)
        else {
            return;
        };

        match self.client.send_to_drive(&request).await {
            Ok(_) => {
                let outcome = self.model.preview.lock().await.finish_send(session, true);
                tracing::info!(tab_id = %request.id, ?outcome, "Tab sent to Google Drive");
                self.model
                    .notify("Successfully sent to Google Drive!", Severity::Success)
                    .await;
            }
            Err(e) => {
                let outcome = self.model.preview.lock().await.finish_send(session, false);
                tracing::error!(tab_id = %request.id, ?outcome, error = %e, "Send to Google Drive failed");
                if outcome == SendOutcome::Reopened {
                    tracing::debug!("Preview reopened with edits intact");
                }
                self.notify_failure(&e, "Failed to send to Google Drive").await;
            }
        }
    }
}

//! Debounced search

use crate::model::is_searchable;
use super::AppController;

impl AppController {
    /// Called on every edit of the search box
    pub async fn on_query_change(&self, query: String) {
        let seq = {
            let mut search = self.model.search.lock().await;
            search.query = query.clone();
            if !is_searchable(&query) {
                self.search_debouncer.cancel_pending();
                search.clear();
                return;
            }
            // Reserved now so a later edit invalidates it even after the timer has fired
            search.reserve()
        };

        let controller = self.clone();
        self.search_debouncer.schedule(self.settings.debounce, async move {
            controller.run_search(seq, query).await;
        });
    }

    /// Issue one search request immediately
    pub async fn perform_search(&self, query: String) {
        let seq = self.model.search.lock().await.issue();
        self.run_search(seq, query).await;
    }

    /// Run the request reserved as `seq` and publish its results if it is still the latest
    pub(crate) async fn run_search(&self, seq: u64, query: String) {
        if !self.model.search.lock().await.begin(seq) {
            tracing::debug!(query = %query, seq, "Search superseded before it was sent");
            return;
        }
        tracing::debug!(query = %query, seq, "Performing search");

        match self.client.search(&query).await {
            Ok(results) => {
                let count = results.len();
                if self.model.search.lock().await.publish(seq, results) {
                    tracing::info!(query = %query, count, "Search completed successfully");
                } else {
                    tracing::debug!(query = %query, seq, "Discarding stale search response");
                }
            }
            Err(e) => {
                if self.model.search.lock().await.fail(seq) {
                    tracing::error!(query = %query, error = %e, "Search failed");
                    self.notify_failure(&e, "Failed to search").await;
                } else {
                    tracing::debug!(query = %query, seq, error = %e, "Ignoring failure of stale search");
                }
            }
        }
    }
}

//! Tab acquisition: search result, direct ID and manual entry all end in a preview

use crate::model::{
    extract_header, manual_tab_id, parse_tab_id, ApiError, ManualEntry, OpenOutcome,
    PreviewDocument, SearchResult, Severity, TabReference,
};
use super::AppController;

impl AppController {
    /// Ask the backend for the formatted tab behind `reference`
    pub async fn acquire(&self, reference: TabReference) -> Result<PreviewDocument, ApiError> {
        match reference {
            TabReference::Search { id, song, artist } => {
                let content = self.client.format_by_id(id).await?;
                Ok(PreviewDocument {
                    song,
                    artist,
                    id: id.to_string(),
                    content,
                    is_manual: false,
                    header_defaulted: false,
                })
            }
            TabReference::DirectId { id } => {
                let content = self.client.format_by_id(id).await?;
                let header = extract_header(&content);
                if header.defaulted {
                    tracing::warn!(tab_id = id, "Could not read song/artist from tab header");
                }
                Ok(PreviewDocument {
                    song: header.song,
                    artist: header.artist,
                    id: id.to_string(),
                    content,
                    is_manual: false,
                    header_defaulted: header.defaulted,
                })
            }
            TabReference::Manual(entry) => {
                let id = manual_tab_id();
                let content = self.client.format_manual(&entry).await?;
                Ok(PreviewDocument {
                    song: entry.song,
                    artist: entry.artist,
                    id,
                    content,
                    is_manual: true,
                    header_defaulted: false,
                })
            }
        }
    }

    /// Run an acquisition and open the preview if nothing superseded it.
    ///
    /// Returns the opened document's header flag on success, `None` when the acquisition
    /// failed or was superseded. Failures of the current acquisition are notified here.
    async fn acquire_into_preview(&self, reference: TabReference, fallback: &str) -> Option<bool> {
        let generation = self.model.preview.lock().await.begin_acquisition();

        match self.acquire(reference).await {
            Ok(doc) => {
                let header_defaulted = doc.header_defaulted;
                let tab_id = doc.id.clone();
                let outcome = self.model.preview.lock().await.open_if_current(generation, doc);
                match outcome {
                    OpenOutcome::Opened => {
                        tracing::info!(tab_id = %tab_id, "Preview opened");
                        Some(header_defaulted)
                    }
                    OpenOutcome::Superseded => {
                        tracing::debug!(tab_id = %tab_id, generation, "Discarding superseded acquisition");
                        None
                    }
                    OpenOutcome::Busy => {
                        tracing::info!(tab_id = %tab_id, "Tab fetched while a send is in progress, not opened");
                        self.model
                            .notify(
                                "Tab not opened: wait for the current send to finish and try again",
                                Severity::Info,
                            )
                            .await;
                        None
                    }
                }
            }
            Err(e) => {
                if self.model.preview.lock().await.fail_acquisition(generation) {
                    tracing::error!(error = %e, "Tab acquisition failed");
                    self.notify_failure(&e, fallback).await;
                } else {
                    tracing::debug!(generation, error = %e, "Ignoring failure of superseded acquisition");
                }
                None
            }
        }
    }

    /// Entry point (a): a result picked from the search list
    pub async fn select_search_result(&self, result: SearchResult) {
        tracing::debug!(tab_id = result.id, song = %result.song, "Search result selected");
        self.acquire_into_preview(TabReference::from(&result), "Failed to get OnSong format")
            .await;
    }

    /// Entry point (b): the typed-in tab ID
    pub async fn fetch_by_id(&self) {
        let input = self.model.ui_state.lock().await.tab_id_input.clone();
        let id = match parse_tab_id(&input) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(input = %input, "Rejected tab ID input");
                self.notify_failure(&e, "Please enter a valid numeric tab ID").await;
                return;
            }
        };

        let Some(header_defaulted) = self
            .acquire_into_preview(TabReference::DirectId { id }, "Failed to get tab by ID")
            .await
        else {
            return;
        };

        self.model.ui_state.lock().await.tab_id_input.clear();
        if header_defaulted {
            self.model
                .notify(
                    "Tab loaded, but song/artist could not be detected",
                    Severity::Warning,
                )
                .await;
        } else {
            self.model.notify("Tab loaded successfully", Severity::Success).await;
        }
    }

    /// Entry point (c): the manual submission form
    pub async fn submit_manual(&self) {
        let entry = {
            let ui = self.model.ui_state.lock().await;
            ManualEntry::validate(&ui.manual_song, &ui.manual_artist, &ui.manual_content)
        };
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                self.notify_failure(&e, "Please fill in the form").await;
                return;
            }
        };

        if self
            .acquire_into_preview(TabReference::Manual(entry), "Failed to format content")
            .await
            .is_some()
        {
            self.model.ui_state.lock().await.clear_manual_form();
        }
    }
}

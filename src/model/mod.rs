//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Page navigation and form input state
//! - `tab`: Search results, tab references, preview documents, submission bodies
//! - `search`: Search query, result set and request sequencing
//! - `preview`: Preview/edit/send state machine
//! - `notification`: Single-slot notification sink
//! - `error`: Backend and validation error types
//! - `api_client`: Backend HTTP client
//! - `app_model`: Main application model holding every state slot

mod types;
mod tab;
mod search;
mod preview;
mod notification;
mod error;
mod api_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ManualField, Page, UiState};

pub use tab::{
    extract_header, manual_tab_id, parse_tab_id, ManualEntry, PreviewDocument, SearchResult,
    TabReference, UNKNOWN_ARTIST, UNKNOWN_SONG,
};

pub use search::{is_searchable, SearchState, MIN_QUERY_LEN};

pub use preview::{OpenOutcome, PreviewPhase, PreviewState, SendOutcome};

pub use notification::{Notification, Severity};

pub use error::ApiError;

pub use api_client::ChordClient;

pub use app_model::AppModel;

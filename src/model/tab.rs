//! Tab data structures: search results, acquisition references, preview documents

use serde::{Deserialize, Serialize};

use super::error::ApiError;

pub const UNKNOWN_SONG: &str = "Unknown Song";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A tab from search results
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(default)]
    pub song: String,
    #[serde(default)]
    pub artist: String,
    #[serde(rename = "type", default)]
    pub tab_type: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchResult {
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// Sort descending by rating. Missing ratings count as 0 and ties keep arrival order.
pub fn sort_by_rating(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.rating_or_zero().total_cmp(&a.rating_or_zero()));
}

/// What a single acquisition attempt asks the backend for
#[derive(Clone, Debug, PartialEq)]
pub enum TabReference {
    /// Chosen from search results, song and artist already known
    Search { id: i64, song: String, artist: String },
    /// Typed-in numeric ID
    DirectId { id: i64 },
    /// User-typed chord text
    Manual(ManualEntry),
}

impl From<&SearchResult> for TabReference {
    fn from(result: &SearchResult) -> Self {
        TabReference::Search {
            id: result.id,
            song: result.song.clone(),
            artist: result.artist.clone(),
        }
    }
}

/// Validated manual submission fields
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ManualEntry {
    pub song: String,
    pub artist: String,
    pub content: String,
}

impl ManualEntry {
    /// Validate the manual form. Song is checked before content.
    ///
    /// Song and artist are trimmed. Content is sent as typed: leading spaces position
    /// chords over lyrics.
    pub fn validate(song: &str, artist: &str, content: &str) -> Result<Self, ApiError> {
        let song = song.trim();
        if song.is_empty() {
            return Err(ApiError::Validation("Please enter a song title".to_string()));
        }

        if content.trim().is_empty() {
            return Err(ApiError::Validation("Please enter chord content".to_string()));
        }

        let artist = match artist.trim() {
            "" => UNKNOWN_ARTIST,
            a => a,
        };

        Ok(Self {
            song: song.to_string(),
            artist: artist.to_string(),
            content: content.to_string(),
        })
    }
}

/// Parse the tab-by-ID input. Must be a strictly positive integer.
pub fn parse_tab_id(input: &str) -> Result<i64, ApiError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ApiError::Validation(
            "Please enter an Ultimate Guitar tab ID".to_string(),
        ));
    }

    match input.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::Validation(
            "Please enter a valid numeric tab ID".to_string(),
        )),
    }
}

/// Identifier for a manual submission, unique per millisecond
pub fn manual_tab_id() -> String {
    format!("manual-{}", chrono::Utc::now().timestamp_millis())
}

/// Song and artist guessed from formatted tab text
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderGuess {
    pub song: String,
    pub artist: String,
    /// True when either field is a placeholder rather than text from the tab
    pub defaulted: bool,
}

/// Best-effort header extraction: line 0 is taken as the song, line 1 as the artist.
///
/// The backend does not promise this layout, so a blank or missing line falls back to a
/// placeholder and the guess is flagged as `defaulted`.
pub fn extract_header(content: &str) -> HeaderGuess {
    let mut lines = content.split('\n').map(str::trim);
    let song = lines.next().filter(|l| !l.is_empty());
    let artist = lines.next().filter(|l| !l.is_empty());

    HeaderGuess {
        defaulted: song.is_none() || artist.is_none(),
        song: song.unwrap_or(UNKNOWN_SONG).to_string(),
        artist: artist.unwrap_or(UNKNOWN_ARTIST).to_string(),
    }
}

/// Tab staged for review before submission
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewDocument {
    pub song: String,
    pub artist: String,
    pub id: String,
    pub content: String,
    pub is_manual: bool,
    /// Song/artist are placeholders from [`extract_header`]
    pub header_defaulted: bool,
}

/// Body of the `/send-to-drive` call
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub content: String,
    pub song: String,
    pub artist: String,
    pub id: String,
    pub is_manual_submission: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_automation: Option<bool>,
}

impl SubmissionRequest {
    pub fn from_document(doc: &PreviewDocument, requires_automation: Option<bool>) -> Self {
        Self {
            content: doc.content.clone(),
            song: doc.song.clone(),
            artist: doc.artist.clone(),
            id: doc.id.clone(),
            is_manual_submission: doc.is_manual,
            requires_automation,
        }
    }
}

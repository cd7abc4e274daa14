//! HTTP client for the tab scraping and formatting backend

use std::time::Duration;

use anyhow::Result;
use reqwest::Response;
use serde::Serialize;

use super::error::{normalize_failure, ApiError};
use super::tab::{ManualEntry, SearchResult, SubmissionRequest};

#[derive(Serialize)]
struct OnSongRequest {
    id: i64,
}

/// Backend client. Cheap to clone, all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ChordClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChordClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into an [`ApiError`]
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // An unreadable body still leaves the status text to report
        let body = response.text().await.unwrap_or_default();
        Err(normalize_failure(status, &body))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        crate::log_api_request!("search", query);
        let response = self
            .http
            .get(self.url("/search"))
            .query(&[("title", query)])
            .send()
            .await?;
        let body = Self::check(response).await?.text().await?;
        let results = serde_json::from_str::<Vec<SearchResult>>(&body)
            .map_err(|e| ApiError::Unknown(format!("search results: {e}")));
        crate::log_api_result!("search", results);
        results
    }

    /// Fetch a tab in OnSong format by its numeric ID
    pub async fn format_by_id(&self, id: i64) -> Result<String, ApiError> {
        crate::log_api_request!("onsong", tab_id = id);
        let response = self
            .http
            .post(self.url("/onsong"))
            .json(&OnSongRequest { id })
            .send()
            .await?;
        let content = match Self::check(response).await {
            Ok(response) => response.text().await.map_err(ApiError::from),
            Err(e) => Err(e),
        };
        crate::log_api_result!("onsong", content);
        content
    }

    pub async fn format_manual(&self, entry: &ManualEntry) -> Result<String, ApiError> {
        crate::log_api_request!("format-manual", song = %entry.song, artist = %entry.artist);
        let response = self
            .http
            .post(self.url("/format-manual"))
            .json(entry)
            .send()
            .await?;
        let content = match Self::check(response).await {
            Ok(response) => response.text().await.map_err(ApiError::from),
            Err(e) => Err(e),
        };
        crate::log_api_result!("format-manual", content);
        content
    }

    pub async fn send_to_drive(&self, request: &SubmissionRequest) -> Result<serde_json::Value, ApiError> {
        crate::log_api_request!(
            "send-to-drive",
            song = %request.song,
            tab_id = %request.id,
            manual = request.is_manual_submission
        );
        let response = self
            .http
            .post(self.url("/send-to-drive"))
            .json(request)
            .send()
            .await?;
        // A 2xx means the upload happened. The body is whatever the webhook answered.
        let response = Self::check(response).await;
        let value = match response {
            Ok(response) => Ok(Self::lenient_body(&response.text().await.unwrap_or_default())),
            Err(e) => Err(e),
        };
        crate::log_api_result!("send-to-drive", value);
        value
    }

    /// JSON when the body parses, otherwise the raw text. Empty bodies become `Null`.
    fn lenient_body(body: &str) -> serde_json::Value {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(trimmed).unwrap_or_else(|_| serde_json::Value::String(trimmed.to_string()))
    }

    /// True when the backend answers `/health` with a 2xx. Never fails.
    pub async fn health(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::error::ErrorKind;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ChordClient {
        ChordClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn search_sends_title_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("title", "amazing grace"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "song": "Amazing Grace", "artist": "Traditional", "type": "Chords", "rating": 4.5}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let results = client(&server).search("amazing grace").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].song, "Amazing Grace");
    }

    #[tokio::test]
    async fn search_error_body_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "scraper blocked"})))
            .mount(&server)
            .await;

        let err = client(&server).search("oceans").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 500,
                message: "scraper blocked".into()
            }
        );
    }

    #[tokio::test]
    async fn search_with_html_body_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let err = client(&server).search("oceans").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn onsong_posts_numeric_id_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/onsong"))
            .and(body_json(serde_json::json!({"id": 1234567})))
            .respond_with(ResponseTemplate::new(200).set_body_string("Oceans\nHillsong\n[G]Oceans"))
            .expect(1)
            .mount(&server)
            .await;

        let content = client(&server).format_by_id(1234567).await.unwrap();
        assert!(content.starts_with("Oceans\n"));
    }

    #[tokio::test]
    async fn onsong_plain_text_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/onsong"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Failed to retrieve OnSong format\n"))
            .mount(&server)
            .await;

        let err = client(&server).format_by_id(5).await.unwrap_err();
        assert_eq!(err.user_message("fallback"), "Failed to retrieve OnSong format");
    }

    #[tokio::test]
    async fn format_manual_posts_entry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/format-manual"))
            .and(body_json(serde_json::json!({
                "song": "Amazing Grace", "artist": "Unknown Artist", "content": "G C D"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{title: Amazing Grace}"))
            .expect(1)
            .mount(&server)
            .await;

        let entry = ManualEntry::validate("Amazing Grace", "", "G C D").unwrap();
        let content = client(&server).format_manual(&entry).await.unwrap();
        assert_eq!(content, "{title: Amazing Grace}");
    }

    #[tokio::test]
    async fn send_to_drive_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-to-drive"))
            .and(body_json(serde_json::json!({
                "content": "x", "song": "s", "artist": "a", "id": "manual-1",
                "isManualSubmission": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let request = SubmissionRequest {
            content: "x".into(),
            song: "s".into(),
            artist: "a".into(),
            id: "manual-1".into(),
            is_manual_submission: true,
            requires_automation: None,
        };
        let value = client(&server).send_to_drive(&request).await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn send_to_drive_accepts_plain_text_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send-to-drive"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Workflow was started"))
            .mount(&server)
            .await;

        let request = SubmissionRequest {
            content: "x".into(),
            song: "s".into(),
            artist: "a".into(),
            id: "7".into(),
            is_manual_submission: false,
            requires_automation: None,
        };
        let value = client(&server).send_to_drive(&request).await.unwrap();
        assert_eq!(value, serde_json::Value::String("Workflow was started".into()));
    }

    #[tokio::test]
    async fn health_reflects_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .mount(&server)
            .await;
        assert!(client(&server).health().await);
    }

    #[tokio::test]
    async fn health_is_false_on_transport_error() {
        // Nothing listens on port 9 of the loopback interface
        let client = ChordClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        assert!(!client.health().await);
        let err = client.search("abc").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}

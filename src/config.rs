//! Command-line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::controller::ControllerSettings;

/// Terminal client for the chord scraper backend
#[derive(Parser, Debug, Clone)]
#[command(name = "chord-scraper")]
#[command(about = "Search Ultimate Guitar tabs, preview them in OnSong format and send them to Google Drive")]
#[command(version)]
pub struct Config {
    /// Base URL of the chord scraper backend
    #[arg(long, default_value = "http://127.0.0.1:8080", env = "CHORD_SCRAPER_API_URL")]
    pub api_url: String,

    /// Quiet period after the last keystroke before a search is sent
    #[arg(long, default_value_t = 500, env = "CHORD_SCRAPER_DEBOUNCE_MS")]
    pub debounce_ms: u64,

    /// Per-request timeout
    #[arg(long, default_value_t = 30, env = "CHORD_SCRAPER_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// How often the backend `/health` endpoint is polled
    #[arg(long, default_value_t = 30, env = "CHORD_SCRAPER_HEALTH_INTERVAL_SECS")]
    pub health_interval_secs: u64,

    /// Ask the backend to run its post-upload automation
    #[arg(long, env = "CHORD_SCRAPER_REQUIRES_AUTOMATION")]
    pub requires_automation: bool,

    /// Directory for the rotating log files
    #[arg(long, default_value = ".logs", env = "CHORD_SCRAPER_LOG_DIR")]
    pub log_dir: PathBuf,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            // Only sent when explicitly enabled; the backend applies its own default otherwise
            requires_automation: self.requires_automation.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_conventions() {
        let config = Config::try_parse_from(["chord-scraper"]).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_dir, PathBuf::from(".logs"));

        let settings = config.controller_settings();
        assert_eq!(settings.debounce, Duration::from_millis(500));
        assert_eq!(settings.requires_automation, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "chord-scraper",
            "--api-url",
            "http://backend:9000",
            "--debounce-ms",
            "250",
            "--requires-automation",
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://backend:9000");

        let settings = config.controller_settings();
        assert_eq!(settings.debounce, Duration::from_millis(250));
        assert_eq!(settings.requires_automation, Some(true));
    }
}

//! Synthesizer configuration.
//!
//! Can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "query_timeout_ms": 1500,
//!   "default_scheme": "https",
//!   "sources": [
//!     { "kind": "web_view_jar", "path": "/data/app/webview-cookies.json" },
//!     { "kind": "binary_cookies", "path": "/Library/Cookies/Cookies.binarycookies" }
//!   ]
//! }
//! ```

use crate::base::context::IoResultExt;
use crate::base::storeerror::StoreError;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on a single source query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration options for [`CookieHeaderSynthesizer`](super::CookieHeaderSynthesizer).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Upper bound on each source query. A source that has not answered by
    /// then contributes no cookies.
    #[serde(rename = "query_timeout_ms", deserialize_with = "duration_from_millis")]
    pub query_timeout: Duration,

    /// Scheme prepended to URLs that arrive without one.
    pub default_scheme: String,

    /// Sources in priority order: on a name clash the earlier one wins.
    pub sources: Vec<SourceConfig>,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            default_scheme: super::normalize::DEFAULT_SCHEME.to_string(),
            sources: Vec::new(),
        }
    }
}

impl SynthesizerConfig {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).store_context(path)?;
        Self::from_json(&json)
    }
}

/// One cookie store to consult.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// JSON snapshot of the embedded engine's jar; the jar decides matching.
    WebViewJar { path: PathBuf },
    /// Netscape `cookies.txt` loaded into a jar; the jar decides matching.
    NetscapeJar { path: PathBuf },
    /// OS shared cookie storage file, filtered by domain suffix.
    BinaryCookies { path: PathBuf },
    /// Chromium-format SQLite `Cookies` database, filtered by domain suffix.
    ChromiumDb { path: PathBuf },
}

fn duration_from_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SynthesizerConfig::default();
        assert_eq!(config.query_timeout, Duration::from_secs(2));
        assert_eq!(config.default_scheme, "https");
        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_from_json() {
        let config = SynthesizerConfig::from_json(
            r#"{
                "query_timeout_ms": 250,
                "sources": [
                    {"kind": "web_view_jar", "path": "/tmp/jar.json"},
                    {"kind": "binary_cookies", "path": "/tmp/Cookies.binarycookies"},
                    {"kind": "chromium_db", "path": "/tmp/Cookies"},
                    {"kind": "netscape_jar", "path": "/tmp/cookies.txt"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.query_timeout, Duration::from_millis(250));
        assert_eq!(config.default_scheme, "https");
        assert_eq!(config.sources.len(), 4);
        assert_eq!(
            config.sources[0],
            SourceConfig::WebViewJar {
                path: PathBuf::from("/tmp/jar.json")
            }
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result = SynthesizerConfig::from_json(r#"{"sources": [{"kind": "carrier_pigeon"}]}"#);
        assert!(matches!(result, Err(StoreError::InvalidData { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SynthesizerConfig::load(Path::new("/nonexistent/cookieheader.json"));
        assert!(matches!(result, Err(StoreError::FileNotFound { .. })));
    }
}

//! JSON snapshot of an embedded jar.
//!
//! Lets a host application hand the engine's jar to this crate as a file.
//! [`SourceConfig::WebViewJar`](crate::urlrequest::SourceConfig::WebViewJar)
//! loads one of these at construction.

use crate::base::context::IoResultExt;
use crate::base::storeerror::StoreError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::monster::CookieMonster;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use time::OffsetDateTime;

/// Serializable representation of a cookie for persistence.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersistentCookie {
    name: String,
    value: String,
    domain: String,
    #[serde(default = "root_path")]
    path: String,
    #[serde(default)]
    secure: bool,
    #[serde(default)]
    http_only: bool,
    #[serde(default)]
    host_only: bool,
    #[serde(default)]
    expires_unix_secs: Option<i64>,
}

fn root_path() -> String {
    "/".to_string()
}

/// Save every cookie in `monster` to `path`.
pub fn save_cookies(monster: &CookieMonster, path: &Path) -> Result<(), StoreError> {
    let all_cookies: Vec<PersistentCookie> = monster
        .iter_all_cookies()
        .map(|cookie| PersistentCookie {
            expires_unix_secs: cookie.expiration_time.map(|t| t.unix_timestamp()),
            name: cookie.name,
            value: cookie.value,
            domain: cookie.domain,
            path: cookie.path,
            secure: cookie.secure,
            http_only: cookie.http_only,
            host_only: cookie.host_only,
        })
        .collect();

    let json = serde_json::to_string_pretty(&all_cookies)?;
    fs::write(path, json).store_context(path)
}

/// Load cookies from `path` into a new jar. Already-expired entries are dropped.
pub fn load_cookies(path: &Path) -> Result<CookieMonster, StoreError> {
    let json = fs::read_to_string(path).store_context(path)?;
    let persistent_cookies: Vec<PersistentCookie> = serde_json::from_str(&json)?;

    let monster = CookieMonster::new();
    let now = OffsetDateTime::now_utc();

    for pc in persistent_cookies {
        let expiration_time = pc
            .expires_unix_secs
            .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok());
        if expiration_time.is_some_and(|expires| expires < now) {
            continue;
        }

        monster.set_canonical_cookie(CanonicalCookie {
            name: pc.name,
            value: pc.value,
            domain: pc.domain,
            path: pc.path,
            creation_time: now,
            expiration_time,
            secure: pc.secure,
            http_only: pc.http_only,
            host_only: pc.host_only,
        });
    }

    Ok(monster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_load_roundtrip() {
        let monster = CookieMonster::new();
        let mut cookie = CanonicalCookie::new("session", "abc123", "example.com").with_secure(true);
        cookie.host_only = false;
        monster.set_canonical_cookie(cookie);

        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        save_cookies(&monster, &path).unwrap();

        let loaded = load_cookies(&path).unwrap();
        assert_eq!(loaded.total_cookie_count(), 1);

        let url = url::Url::parse("https://www.example.com/").unwrap();
        assert_eq!(loaded.get_cookie_header(&url), "session=abc123");
    }

    #[test]
    fn test_load_applies_defaults_and_drops_expired() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(
            &path,
            r#"[
                {"name": "a", "value": "1", "domain": "example.com", "host_only": true},
                {"name": "old", "value": "x", "domain": "example.com", "expires_unix_secs": 1}
            ]"#,
        )
        .unwrap();

        let loaded = load_cookies(&path).unwrap();
        let url = url::Url::parse("https://example.com/any").unwrap();
        assert_eq!(loaded.get_cookie_header(&url), "a=1");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        fs::write(&path, "{").unwrap();

        assert!(matches!(
            load_cookies(&path),
            Err(StoreError::InvalidData { .. })
        ));
    }
}

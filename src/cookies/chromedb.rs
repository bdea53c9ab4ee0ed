//! Reader for an engine's on-disk Chromium cookie database.
//!
//! Android's `WebView` (and any Chromium embedder) persists its jar to a
//! SQLite file named `Cookies` using the schema from
//! `net/extras/sqlite/sqlite_persistent_cookie_store.cc`. Reading it
//! directly gives a bulk store: all cookies, all domains, no filtering.
//!
//! Rows whose plaintext `value` is empty carry only an `encrypted_value`;
//! those are skipped.

use crate::base::storeerror::StoreError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use time::OffsetDateTime;

/// Chromium uses microseconds since 1601-01-01 00:00:00 UTC (Windows FILETIME epoch).
/// This is the offset from Unix epoch (1970-01-01) in microseconds.
///
/// Reference: `base/time/time.h`
pub const CHROME_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

const SELECT_COOKIES: &str = "SELECT host_key, name, value, path, expires_utc, is_secure, \
     is_httponly, creation_utc FROM cookies ORDER BY creation_utc, host_key, name, path";

/// Convert Chrome epoch (microseconds since 1601) to a timestamp. `0` means
/// "no expiry" (session cookie).
pub fn chrome_to_unix_timestamp(chrome_time: i64) -> Option<OffsetDateTime> {
    if chrome_time == 0 {
        return None;
    }

    let unix_secs = chrome_time.checked_sub(CHROME_EPOCH_OFFSET_MICROS)? / 1_000_000;
    OffsetDateTime::from_unix_timestamp(unix_secs).ok()
}

/// Convert a timestamp to Chrome epoch (microseconds since 1601).
pub fn unix_to_chrome_timestamp(time: OffsetDateTime) -> i64 {
    time.unix_timestamp()
        .saturating_mul(1_000_000)
        .saturating_add(CHROME_EPOCH_OFFSET_MICROS)
}

struct ChromeCookieRow {
    host_key: String,
    name: String,
    value: String,
    path: String,
    expires_utc: i64,
    is_secure: i32,
    is_httponly: i32,
    creation_utc: i64,
}

/// Read every plaintext cookie from the database at `path`.
///
/// The order is fixed by the query (creation time, then host, name, path),
/// so repeated reads of an unchanged file return identical lists.
pub fn read_cookies(path: &Path) -> Result<Vec<CanonicalCookie>, StoreError> {
    if !path.exists() {
        return Err(StoreError::file_not_found(path.display().to_string()));
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let mut stmt = conn.prepare(SELECT_COOKIES)?;
    let rows = stmt.query_map([], |row| {
        Ok(ChromeCookieRow {
            host_key: row.get(0)?,
            name: row.get(1)?,
            value: row.get(2)?,
            path: row.get(3)?,
            expires_utc: row.get(4)?,
            is_secure: row.get(5)?,
            is_httponly: row.get(6)?,
            creation_utc: row.get(7)?,
        })
    })?;

    let now = OffsetDateTime::now_utc();
    let mut cookies = Vec::new();
    for row in rows {
        let row = row?;
        if row.value.is_empty() {
            continue;
        }

        cookies.push(CanonicalCookie {
            name: row.name,
            value: row.value,
            host_only: !row.host_key.starts_with('.'),
            domain: row.host_key,
            path: row.path,
            creation_time: chrome_to_unix_timestamp(row.creation_utc).unwrap_or(now),
            expiration_time: chrome_to_unix_timestamp(row.expires_utc),
            secure: row.is_secure != 0,
            http_only: row.is_httponly != 0,
        });
    }

    tracing::debug!(path = %path.display(), count = cookies.len(), "read chromium cookie database");
    Ok(cookies)
}

/// Create a minimal `cookies` table and insert `(host_key, name, value, creation_utc)` rows.
#[cfg(test)]
pub(crate) fn write_test_db(path: &Path, rows: &[(&str, &str, &str, i64)]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE cookies (
            creation_utc INTEGER NOT NULL,
            host_key TEXT NOT NULL,
            name TEXT NOT NULL,
            value TEXT NOT NULL,
            encrypted_value BLOB NOT NULL DEFAULT x'',
            path TEXT NOT NULL,
            expires_utc INTEGER NOT NULL,
            is_secure INTEGER NOT NULL,
            is_httponly INTEGER NOT NULL
        );",
    )
    .unwrap();
    for (host_key, name, value, creation_utc) in rows {
        conn.execute(
            "INSERT INTO cookies (creation_utc, host_key, name, value, path, expires_utc, is_secure, is_httponly)
             VALUES (?1, ?2, ?3, ?4, '/', 0, 0, 0)",
            rusqlite::params![creation_utc, host_key, name, value],
        )
        .unwrap();
    }
}

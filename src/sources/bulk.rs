//! Bulk cookie stores: sources of "every cookie, every domain".

use super::{BulkCookieStore, Querying};
use crate::base::storeerror::StoreError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::{chromedb, safari};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::sync::oneshot;

/// An in-memory bulk store. Cheap to clone; clones share the same cookies.
#[derive(Debug, Clone, Default)]
pub struct MemoryBulkStore {
    label: String,
    cookies: Arc<RwLock<Vec<CanonicalCookie>>>,
}

impl MemoryBulkStore {
    pub fn new(cookies: Vec<CanonicalCookie>) -> Self {
        Self {
            label: "memory".to_string(),
            cookies: Arc::new(RwLock::new(cookies)),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replace the stored cookies.
    pub fn replace(&self, cookies: Vec<CanonicalCookie>) {
        if let Ok(mut guard) = self.cookies.write() {
            *guard = cookies;
        }
    }
}

impl BulkCookieStore for MemoryBulkStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn all_cookies(&self) -> Querying {
        let result = self
            .cookies
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::unavailable(self.label.clone()));
        Box::pin(std::future::ready(result))
    }
}

/// The OS shared cookie storage file (`Cookies.binarycookies`), re-read on
/// every query.
#[derive(Debug, Clone)]
pub struct BinaryCookiesStore {
    label: String,
    path: PathBuf,
}

impl BinaryCookiesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            label: "shared-storage".to_string(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BulkCookieStore for BinaryCookiesStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn all_cookies(&self) -> Querying {
        let path = self.path.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || safari::read_binary_cookies(&path)).await?
        })
    }
}

/// An engine's Chromium-format SQLite `Cookies` database, re-read on every
/// query.
#[derive(Debug, Clone)]
pub struct ChromiumDbStore {
    label: String,
    path: PathBuf,
}

impl ChromiumDbStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            label: "chromium-db".to_string(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BulkCookieStore for ChromiumDbStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn all_cookies(&self) -> Querying {
        let path = self.path.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || chromedb::read_cookies(&path)).await?
        })
    }
}

/// Completion handle passed to a [`CallbackBulkStore`] fetch function.
///
/// Calling it more than once is impossible; dropping it without calling it
/// fails the query with [`StoreError::Unavailable`].
pub type Completion = Box<dyn FnOnce(Result<Vec<CanonicalCookie>, StoreError>) + Send>;

type FetchFn = dyn Fn(Completion) + Send + Sync;

/// Adapts a completion-handler API (e.g. WebKit's
/// `httpCookieStore.getAllCookies { cookies in ... }`) into a bulk store.
///
/// The fetch function may call the completion synchronously, from another
/// thread, or never; a completion that never arrives is bounded by the
/// synthesizer's query timeout.
#[derive(Clone)]
pub struct CallbackBulkStore {
    label: String,
    fetch: Arc<FetchFn>,
}

impl CallbackBulkStore {
    pub fn new<F>(label: impl Into<String>, fetch: F) -> Self
    where
        F: Fn(Completion) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            fetch: Arc::new(fetch),
        }
    }
}

impl fmt::Debug for CallbackBulkStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBulkStore")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl BulkCookieStore for CallbackBulkStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn all_cookies(&self) -> Querying {
        let (tx, rx) = oneshot::channel();
        let completion: Completion = Box::new(move |result| {
            // The receiver is gone if the query already timed out.
            let _ = tx.send(result);
        });
        (self.fetch)(completion);

        let label = self.label.clone();
        Box::pin(async move { rx.await.map_err(|_| StoreError::unavailable(label))? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memory_store_replace() {
        let store = MemoryBulkStore::new(vec![CanonicalCookie::new("a", "1", ".example.com")]);
        assert_eq!(store.all_cookies().await.unwrap().len(), 1);

        store.replace(Vec::new());
        assert!(store.all_cookies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_binary_cookies_store_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cookies.binarycookies");
        let data = safari::encode_binary_cookies(&[
            CanonicalCookie::new("sid", "abc", ".example.com"),
            CanonicalCookie::new("other", "x", "other.org"),
        ]);
        std::fs::write(&path, data).unwrap();

        let cookies = BinaryCookiesStore::new(&path).all_cookies().await.unwrap();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name, "sid");
    }

    #[tokio::test]
    async fn test_binary_cookies_store_missing_file() {
        let err = BinaryCookiesStore::new("/nonexistent/Cookies.binarycookies")
            .all_cookies()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_chromium_db_store_reads_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cookies");
        chromedb::write_test_db(&path, &[(".example.com", "sid", "abc", 1)]);

        let cookies = ChromiumDbStore::new(&path).all_cookies().await.unwrap();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].value, "abc");
    }

    #[tokio::test]
    async fn test_callback_store_completes_from_other_thread() {
        let store = CallbackBulkStore::new("webkit", |done: Completion| {
            std::thread::spawn(move || {
                done(Ok(vec![CanonicalCookie::new("sid", "1", ".example.com")]));
            });
        });

        let cookies = store.all_cookies().await.unwrap();
        assert_eq!(cookies[0].name, "sid");
    }

    #[tokio::test]
    async fn test_callback_store_dropped_completion() {
        let store = CallbackBulkStore::new("webkit", |done: Completion| drop(done));
        let err = store.all_cookies().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}

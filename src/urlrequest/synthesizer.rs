//! The `Cookie` header synthesizer.
//!
//! Sequences normalization, a concurrent query of every source, and the
//! merge. Nothing in here can fail from the caller's point of view: each
//! source is isolated, and the worst case is an empty header.

use super::config::{SourceConfig, SynthesizerConfig};
use super::normalize::{normalize_with_scheme, NormalizedUrl};
use crate::base::context::IoResultExt;
use crate::base::storeerror::StoreError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::monster::CookieMonster;
use crate::cookies::persistence;
use crate::header::{merge, CookieHeader};
use crate::sources::{
    BinaryCookiesStore, ChromiumDbStore, CookieSource, DelegatedSource, SuffixMatchSource,
};
use futures::future::join_all;
use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

/// Builds `Cookie` headers from an ordered list of cookie sources.
///
/// The synthesizer holds no cookie state of its own; every call re-queries
/// every source.
///
/// # Example
///
/// ```rust
/// use cookieheader::cookies::canonicalcookie::CanonicalCookie;
/// use cookieheader::cookies::monster::CookieMonster;
/// use cookieheader::sources::{DelegatedSource, MemoryBulkStore, SuffixMatchSource};
/// use cookieheader::urlrequest::CookieHeaderSynthesizer;
/// use std::sync::Arc;
///
/// let jar = Arc::new(CookieMonster::new());
/// let url = url::Url::parse("https://example.com/").unwrap();
/// jar.parse_and_save_cookie(&url, "sid=1");
///
/// let shared = MemoryBulkStore::new(vec![
///     CanonicalCookie::new("sid", "2", ".example.com"),
///     CanonicalCookie::new("theme", "dark", ".example.com"),
/// ]);
///
/// let synthesizer = CookieHeaderSynthesizer::new()
///     .with_source(DelegatedSource::new(jar))
///     .with_source(SuffixMatchSource::new(shared));
///
/// assert_eq!(synthesizer.get_cookie_header_blocking("example.com"), "sid=1; theme=dark");
/// ```
pub struct CookieHeaderSynthesizer {
    sources: Vec<Arc<dyn CookieSource>>,
    query_timeout: Duration,
    default_scheme: String,
}

impl Default for CookieHeaderSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CookieHeaderSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.sources.iter().map(|s| s.label()).collect();
        f.debug_struct("CookieHeaderSynthesizer")
            .field("sources", &labels)
            .field("query_timeout", &self.query_timeout)
            .field("default_scheme", &self.default_scheme)
            .finish()
    }
}

impl CookieHeaderSynthesizer {
    /// A synthesizer with no sources and default settings.
    pub fn new() -> Self {
        let config = SynthesizerConfig::default();
        Self {
            sources: Vec::new(),
            query_timeout: config.query_timeout,
            default_scheme: config.default_scheme,
        }
    }

    /// Build the sources listed in `config`, in order.
    ///
    /// Jar snapshots are loaded here and a broken one is an error. Bulk
    /// store files are only opened at query time.
    pub fn from_config(config: &SynthesizerConfig) -> Result<Self, StoreError> {
        let mut synthesizer = Self::new()
            .with_query_timeout(config.query_timeout)
            .with_default_scheme(config.default_scheme.clone());

        for source in &config.sources {
            synthesizer = match source {
                SourceConfig::WebViewJar { path } => {
                    let jar = persistence::load_cookies(path)?;
                    synthesizer.with_source(DelegatedSource::with_label("webview-jar", Arc::new(jar)))
                }
                SourceConfig::NetscapeJar { path } => {
                    let content = std::fs::read_to_string(path).store_context(path)?;
                    let jar = CookieMonster::new();
                    jar.import_netscape(&content);
                    synthesizer.with_source(DelegatedSource::with_label("netscape-jar", Arc::new(jar)))
                }
                SourceConfig::BinaryCookies { path } => {
                    synthesizer.with_source(SuffixMatchSource::new(BinaryCookiesStore::new(path)))
                }
                SourceConfig::ChromiumDb { path } => {
                    synthesizer.with_source(SuffixMatchSource::new(ChromiumDbStore::new(path)))
                }
            };
        }

        Ok(synthesizer)
    }

    /// Append a source. Sources added earlier win name clashes.
    pub fn with_source(mut self, source: impl CookieSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Append an already shared source.
    pub fn with_shared_source(mut self, source: Arc<dyn CookieSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// The `Cookie` header for `raw_url`, or `""`.
    ///
    /// Must run inside a Tokio runtime (the per-source timeout uses Tokio's
    /// timer).
    pub async fn get_cookies(&self, raw_url: &str) -> String {
        self.get_cookie_header(raw_url).await
    }

    /// Same as [`get_cookies`](Self::get_cookies).
    pub async fn get_cookie_header(&self, raw_url: &str) -> String {
        self.synthesize(raw_url).await.to_string()
    }

    /// The merged header as structured pairs.
    pub async fn synthesize(&self, raw_url: &str) -> CookieHeader {
        if raw_url.trim().is_empty() {
            tracing::debug!("empty URL, skipping cookie sources");
            return CookieHeader::new();
        }

        let target = normalize_with_scheme(raw_url, &self.default_scheme);
        tracing::debug!(
            host = %target.host(),
            sources = self.sources.len(),
            "synthesizing cookie header"
        );

        let queries = self
            .sources
            .iter()
            .enumerate()
            .map(|(rank, source)| self.query_isolated(rank, source.as_ref(), &target));
        let results = join_all(queries).await;

        let header = merge(results);
        tracing::debug!(host = %target.host(), cookies = header.len(), "cookie header ready");
        header
    }

    /// Blocking variant for synchronous callers.
    ///
    /// The query runs on a private current-thread runtime. When the caller
    /// is already inside a Tokio runtime, that private runtime is driven
    /// from a scoped helper thread, since runtimes cannot nest.
    pub fn get_cookie_header_blocking(&self, raw_url: &str) -> String {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.block_on_private_runtime(raw_url);
        }

        tracing::debug!("blocking cookie query inside a runtime, using a helper thread");
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.block_on_private_runtime(raw_url))
                .join()
                .unwrap_or_else(|_| {
                    tracing::warn!("cookie query helper thread panicked");
                    String::new()
                })
        })
    }

    fn block_on_private_runtime(&self, raw_url: &str) -> String {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.get_cookie_header(raw_url)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build runtime for cookie query");
                String::new()
            }
        }
    }

    /// Query one source. Errors, panics and timeouts all become an empty list.
    async fn query_isolated(
        &self,
        rank: usize,
        source: &dyn CookieSource,
        target: &NormalizedUrl,
    ) -> Vec<CanonicalCookie> {
        let label = source.label();

        match self.query_source(source, target).await {
            Ok(cookies) => {
                tracing::debug!(source = %label, rank, count = cookies.len(), "cookie source answered");
                cookies
            }
            Err(e) => {
                tracing::warn!(
                    source = %label,
                    rank,
                    error = %e,
                    transient = e.is_transient(),
                    "cookie source failed"
                );
                Vec::new()
            }
        }
    }

    /// Run one source query under the timeout, turning panics and expiry
    /// into [`StoreError`]s.
    async fn query_source(
        &self,
        source: &dyn CookieSource,
        target: &NormalizedUrl,
    ) -> Result<Vec<CanonicalCookie>, StoreError> {
        let query = std::panic::catch_unwind(AssertUnwindSafe(|| source.query(target)))
            .map_err(|_| StoreError::panicked(source.label()))?;

        let guarded = AssertUnwindSafe(query).catch_unwind();
        match tokio::time::timeout(self.query_timeout, guarded).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(StoreError::panicked(source.label())),
            Err(_) => Err(StoreError::TimedOut(self.query_timeout)),
        }
    }
}

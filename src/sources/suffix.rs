//! Source that filters a bulk store by domain suffix.

use super::{BulkCookieStore, CookieSource, Querying};
use crate::cookies::domainmatch::suffix_matches;
use crate::urlrequest::NormalizedUrl;

/// Pulls every cookie out of a [`BulkCookieStore`] and keeps those whose
/// domain suffix-matches the target host.
///
/// A cookie with domain `D` matches host `H` when, after stripping one
/// leading `.` from `D`, `H` equals it or ends with `"." + D`. There is no
/// host-only distinction here: `example.com` matches `www.example.com`.
/// Store order is preserved.
#[derive(Debug, Clone)]
pub struct SuffixMatchSource<S> {
    store: S,
}

impl<S: BulkCookieStore> SuffixMatchSource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: BulkCookieStore> CookieSource for SuffixMatchSource<S> {
    fn label(&self) -> &str {
        self.store.label()
    }

    fn query(&self, target: &NormalizedUrl) -> Querying {
        let host = target.host().to_string();
        let all = self.store.all_cookies();

        Box::pin(async move {
            let mut cookies = all.await?;
            let total = cookies.len();
            cookies.retain(|c| suffix_matches(&c.domain, &host));
            tracing::debug!(host = %host, total, matched = cookies.len(), "filtered bulk cookie store");
            Ok(cookies)
        })
    }
}

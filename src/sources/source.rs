//! The cookie source abstraction.

use crate::base::storeerror::StoreError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::urlrequest::NormalizedUrl;
use std::{future::Future, pin::Pin, sync::Arc};

/// Alias for the `Future` returned by a cookie source or bulk store.
pub type Querying = Pin<Box<dyn Future<Output = Result<Vec<CanonicalCookie>, StoreError>> + Send>>;

/// One cookie store, queried for the cookies relevant to a URL.
///
/// Synchronous and callback-driven stores look the same from here: each
/// query is a boxed future, so the synthesizer can fan out over all sources
/// and join them.
///
/// # Design Notes
///
/// - Uses `&self` so sources can be queried concurrently.
/// - The returned future owns what it needs; it may outlive the borrow of
///   `target`.
/// - Implementations may fail; the synthesizer turns any failure into an
///   empty contribution from that source alone.
pub trait CookieSource: Send + Sync {
    /// Short name used in logs.
    fn label(&self) -> &str;

    /// Cookies this store considers relevant to `target`, in store order.
    fn query(&self, target: &NormalizedUrl) -> Querying;
}

/// Blanket implementation for Arc-wrapped sources.
impl<S: CookieSource + ?Sized> CookieSource for Arc<S> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn query(&self, target: &NormalizedUrl) -> Querying {
        (**self).query(target)
    }
}

/// A store that can only hand back everything it holds, across all domains.
///
/// Wrap one in [`SuffixMatchSource`](super::SuffixMatchSource) to get a
/// [`CookieSource`].
pub trait BulkCookieStore: Send + Sync {
    fn label(&self) -> &str;

    /// Every stored cookie. The order must be stable for an unchanged store.
    fn all_cookies(&self) -> Querying;
}

impl<S: BulkCookieStore + ?Sized> BulkCookieStore for Arc<S> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn all_cookies(&self) -> Querying {
        (**self).all_cookies()
    }
}

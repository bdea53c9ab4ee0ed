//! Cookie source adapters.
//!
//! Every store the synthesizer reads is a [`CookieSource`]. Two behaviors
//! exist, matching the two ways the underlying stores answer:
//!
//! - [`DelegatedSource`]: the store (an embedded engine jar) decides which
//!   cookies apply to a URL.
//! - [`SuffixMatchSource`]: the store only lists everything
//!   ([`BulkCookieStore`]) and the adapter filters by domain suffix.
//!
//! Bulk stores: [`MemoryBulkStore`], [`BinaryCookiesStore`] (OS shared cookie
//! storage file), [`ChromiumDbStore`] (engine SQLite database) and
//! [`CallbackBulkStore`] (completion-handler APIs).
//!
//! # Example
//!
//! ```rust
//! use cookieheader::cookies::canonicalcookie::CanonicalCookie;
//! use cookieheader::sources::{CookieSource, MemoryBulkStore, SuffixMatchSource};
//! use cookieheader::urlrequest::normalize;
//!
//! # tokio_test_main();
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn tokio_test_main() {
//! let store = MemoryBulkStore::new(vec![CanonicalCookie::new("sid", "1", ".example.com")]);
//! let source = SuffixMatchSource::new(store);
//! let cookies = source.query(&normalize("www.example.com")).await.unwrap();
//! assert_eq!(cookies.len(), 1);
//! # }
//! ```

mod bulk;
mod delegated;
mod source;
mod suffix;

pub use bulk::{BinaryCookiesStore, CallbackBulkStore, ChromiumDbStore, Completion, MemoryBulkStore};
pub use delegated::DelegatedSource;
pub use source::{BulkCookieStore, CookieSource, Querying};
pub use suffix::SuffixMatchSource;

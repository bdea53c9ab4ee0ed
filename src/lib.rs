//! # cookieheader
//!
//! Builds a single `Cookie` request header for a URL out of several cookie
//! stores that do not share a view of each other.
//!
//! A host app typically has at least two: the embedded web engine's jar,
//! which matches cookies itself, and an OS-level shared store that can only
//! hand back everything it holds. This crate asks all of them at once,
//! bounds each query with a timeout, merges the answers with the first
//! source winning name clashes, and formats the result.
//!
//! ## Quick Start
//!
//! ```rust
//! use cookieheader::cookies::canonicalcookie::CanonicalCookie;
//! use cookieheader::sources::{MemoryBulkStore, SuffixMatchSource};
//! use cookieheader::urlrequest::CookieHeaderSynthesizer;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let shared = MemoryBulkStore::new(vec![CanonicalCookie::new("sid", "1", ".example.com")]);
//!     let synthesizer = CookieHeaderSynthesizer::new().with_source(SuffixMatchSource::new(shared));
//!
//!     assert_eq!(synthesizer.get_cookies("www.example.com").await, "sid=1");
//!     assert_eq!(synthesizer.get_cookies("").await, "");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error type for store access
//! - [`cookies`] - Cookie model, the in-memory jar, and on-disk store readers
//! - [`sources`] - Adapters that turn a store into a queryable cookie source
//! - [`header`] - Merge and `Cookie` header formatting
//! - [`urlrequest`] - URL normalization, configuration, and the synthesizer
//! - [`media`] - Image persistence for the host app
//!
//! Querying never surfaces an error. A source that fails, panics, or
//! stalls past the timeout contributes no cookies and is logged through
//! `tracing`.

pub mod base;
pub mod cookies;
pub mod header;
pub mod media;
pub mod sources;
pub mod urlrequest;

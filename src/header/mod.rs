//! Merging per-source results into one `Cookie` header.

mod cookieheader;

pub use cookieheader::{merge, CookieHeader, SEPARATOR};

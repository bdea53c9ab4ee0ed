//! Cookie representation and the stores header synthesis reads from.
//!
//! | Store | Type / reader | Matching |
//! |-------|---------------|----------|
//! | Embedded engine jar | [`CookieMonster`](monster::CookieMonster) | jar decides (RFC 6265) |
//! | Jar snapshot on disk | [`persistence`] | loaded into a `CookieMonster` |
//! | OS shared storage | [`safari::parse_binary_cookies`] | bulk, caller filters |
//! | Engine SQLite database | [`chromedb::read_cookies`] | bulk, caller filters |
//!
//! The two matching rules are in [`domainmatch`].
//!
//! # Example
//!
//! ```rust
//! use cookieheader::cookies::monster::CookieMonster;
//! use url::Url;
//!
//! let jar = CookieMonster::new();
//! let url = Url::parse("https://www.example.com/").unwrap();
//! jar.parse_and_save_cookie(&url, "sid=42; Domain=example.com");
//! assert_eq!(jar.get_cookie_header(&url), "sid=42");
//! ```

pub mod canonicalcookie;
pub mod chromedb;
pub mod domainmatch;
pub mod monster;
pub mod persistence;
pub mod psl;
pub mod safari;

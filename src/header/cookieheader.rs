use crate::cookies::canonicalcookie::CanonicalCookie;
use http::header::HeaderValue;
use std::collections::HashSet;
use std::fmt;

/// Separator between `name=value` pairs in a `Cookie` header.
pub const SEPARATOR: &str = "; ";

/// An ordered, name-unique list of cookie pairs ready to be sent.
///
/// Pairs keep the order in which they were first seen. Displays as the
/// header string: `a=1; b=2`, or `""` when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieHeader {
    pairs: Vec<(String, String)>,
}

impl CookieHeader {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The header as an `http` value for `http::header::COOKIE`.
    /// `None` when empty or when a value holds bytes a header cannot carry.
    pub fn to_header_value(&self) -> Option<HeaderValue> {
        if self.is_empty() {
            return None;
        }
        HeaderValue::from_str(&self.to_string()).ok()
    }
}

impl fmt::Display for CookieHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// Merge per-source results, highest priority first.
///
/// Cookies are walked in source order and, within a source, in the order the
/// source returned them. The first cookie with a given name wins; any later
/// cookie with that name is dropped, whatever its value. Nameless cookies
/// are skipped.
pub fn merge<I>(ordered_results: I) -> CookieHeader
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = CanonicalCookie>,
{
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();

    for cookie in ordered_results.into_iter().flatten() {
        if cookie.name.is_empty() || seen.contains(&cookie.name) {
            continue;
        }
        seen.insert(cookie.name.clone());
        pairs.push((cookie.name, cookie.value));
    }

    CookieHeader { pairs }
}

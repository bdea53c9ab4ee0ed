//! Public Suffix List checks for `Domain` attributes.
//!
//! A jar must refuse `Set-Cookie` lines that scope a cookie to a public
//! suffix (`.com`, `.co.uk`, `github.io`), otherwise one site could plant a
//! cookie that every other site under that suffix receives.

use crate::cookies::domainmatch::{domain_matches, strip_leading_dot};
use psl::{List, Psl};

/// True when `domain` is itself a public suffix (e.g. "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_ascii_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

/// A `Domain` attribute is acceptable when it is not a public suffix and the
/// setting host is that domain or one of its subdomains.
pub fn is_valid_cookie_domain(cookie_domain: &str, url_host: &str) -> bool {
    let cookie_domain = strip_leading_dot(cookie_domain);
    if cookie_domain.is_empty() || is_public_suffix(cookie_domain) {
        return false;
    }

    domain_matches(cookie_domain, url_host, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_public_suffix() {
        assert!(is_public_suffix("com"));
        assert!(is_public_suffix("CO.UK"));
        assert!(is_public_suffix("github.io"));
    }

    #[test]
    fn test_not_public_suffix() {
        assert!(!is_public_suffix("example.com"));
        assert!(!is_public_suffix("sub.example.co.uk"));
    }

    #[test]
    fn test_valid_cookie_domain() {
        assert!(is_valid_cookie_domain("example.com", "example.com"));
        assert!(is_valid_cookie_domain(".example.com", "sub.example.com"));
    }

    #[test]
    fn test_invalid_cookie_domain() {
        assert!(!is_valid_cookie_domain(".com", "example.com"));
        assert!(!is_valid_cookie_domain("co.uk", "example.co.uk"));
        assert!(!is_valid_cookie_domain("other.com", "example.com"));
        assert!(!is_valid_cookie_domain("", "example.com"));
    }
}

//! Cookie-to-host matching rules.
//!
//! Two rules live here because the stores disagree on them:
//!
//! - [`domain_matches`] is RFC 6265 §5.1.3 matching with host-only cookies,
//!   used by the embedded jar ([`CookieMonster`](super::monster::CookieMonster)).
//! - [`suffix_matches`] is the bulk-store rule: strip one leading `.` from the
//!   cookie domain and accept an exact host match or any subdomain, with no
//!   host-only distinction.

/// Returns the cookie domain with a single leading `.` removed.
pub fn strip_leading_dot(domain: &str) -> &str {
    domain.strip_prefix('.').unwrap_or(domain)
}

/// Bulk-store match: `host == D'` or `host` ends with `"." + D'`, where `D'`
/// is `cookie_domain` minus one leading dot. Comparison is ASCII
/// case-insensitive. Empty hosts and empty domains never match.
pub fn suffix_matches(cookie_domain: &str, host: &str) -> bool {
    let domain = strip_leading_dot(cookie_domain);
    if host.is_empty() || domain.is_empty() {
        return false;
    }

    if host.eq_ignore_ascii_case(domain) {
        return true;
    }

    is_dotted_suffix(host, domain)
}

/// RFC 6265 domain match. Host-only cookies need an exact host match;
/// domain cookies also match subdomains.
pub fn domain_matches(cookie_domain: &str, request_host: &str, host_only: bool) -> bool {
    if host_only {
        return cookie_domain.eq_ignore_ascii_case(request_host);
    }

    let cookie_domain = strip_leading_dot(cookie_domain);
    if request_host.eq_ignore_ascii_case(cookie_domain) {
        return true;
    }

    is_dotted_suffix(request_host, cookie_domain)
}

/// RFC 6265 path match.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }

    false
}

/// `host` ends with `"." + domain`, ignoring ASCII case.
fn is_dotted_suffix(host: &str, domain: &str) -> bool {
    if domain.is_empty() || host.len() <= domain.len() {
        return false;
    }

    let split = host.len() - domain.len();
    match (host.get(..split), host.get(split..)) {
        (Some(head), Some(tail)) => head.ends_with('.') && tail.eq_ignore_ascii_case(domain),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_leading_dot() {
        assert!(suffix_matches(".example.com", "example.com"));
        assert!(suffix_matches(".example.com", "www.example.com"));
        assert!(suffix_matches(".example.com", "a.b.example.com"));
        assert!(!suffix_matches(".example.com", "notexample.com"));
    }

    #[test]
    fn test_suffix_bare_domain() {
        assert!(suffix_matches("example.com", "example.com"));
        assert!(suffix_matches("example.com", "www.example.com"));
        assert!(!suffix_matches("example.com", "notexample.com"));
        assert!(!suffix_matches("www.example.com", "example.com"));
    }

    #[test]
    fn test_suffix_strips_only_one_dot() {
        assert!(!suffix_matches("..example.com", "example.com"));
    }

    #[test]
    fn test_suffix_case_insensitive() {
        assert!(suffix_matches(".Example.COM", "www.example.com"));
    }

    #[test]
    fn test_suffix_empty_inputs() {
        assert!(!suffix_matches("", ""));
        assert!(!suffix_matches(".", "example.com"));
        assert!(!suffix_matches(".example.com", ""));
    }

    #[test]
    fn test_suffix_non_ascii_host() {
        // Must not panic on a non-char-boundary split.
        assert!(!suffix_matches("b.com", "é.com"));
        assert!(suffix_matches("xample.com", "é.xample.com"));
    }

    #[test]
    fn test_domain_matches_host_only() {
        assert!(domain_matches("example.com", "example.com", true));
        assert!(!domain_matches("example.com", "www.example.com", true));
    }

    #[test]
    fn test_domain_matches_domain_cookie() {
        assert!(domain_matches("example.com", "www.example.com", false));
        assert!(domain_matches(".example.com", "example.com", false));
        assert!(!domain_matches("example.com", "badexample.com", false));
    }

    #[test]
    fn test_path_matches() {
        assert!(path_matches("/", "/anything"));
        assert!(path_matches("/foo", "/foo"));
        assert!(path_matches("/foo", "/foo/bar"));
        assert!(path_matches("/foo/", "/foo/bar"));
        assert!(!path_matches("/foo", "/foobar"));
        assert!(!path_matches("/baz", "/foo"));
    }
}

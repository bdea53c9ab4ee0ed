use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::domainmatch::{domain_matches, path_matches, strip_leading_dot};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// The embedded web engine's cookie jar.
/// Modeled after Chromium's `net::CookieMonster`, which is what an Android
/// `WebView` reads through `CookieManager`.
///
/// The jar decides relevance itself: callers hand it a URL and get back the
/// cookies a browser would attach, already filtered by domain, path, secure
/// flag and expiry.
pub struct CookieMonster {
    // Store: Map<Domain, List<Cookie>>, keyed by lower-cased domain without
    // the leading dot.
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
    accept_cookies: AtomicBool,
}

impl Default for CookieMonster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CookieMonster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieMonster")
            .field("domains", &self.store.len())
            .field("cookies", &self.total_cookie_count())
            .field("accept_cookies", &self.accept_cookie())
            .finish()
    }
}

impl CookieMonster {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
            accept_cookies: AtomicBool::new(true),
        }
    }

    /// Toggle the jar-wide "accept cookies" setting. Idempotent.
    pub fn set_accept_cookie(&self, accept: bool) {
        self.accept_cookies.store(accept, Ordering::SeqCst);
    }

    pub fn accept_cookie(&self) -> bool {
        self.accept_cookies.load(Ordering::SeqCst)
    }

    /// Insert a cookie, replacing any existing one with the same name, path,
    /// domain and host-only flag.
    ///
    /// A host-only `example.com` cookie and a `.example.com` domain cookie
    /// of the same name are distinct and both kept.
    pub fn set_canonical_cookie(&self, cookie: CanonicalCookie) {
        let key = strip_leading_dot(&cookie.domain).to_ascii_lowercase();
        let mut entry = self.store.entry(key).or_default();
        entry.retain(|c| !same_identity(c, &cookie));
        entry.push(cookie);
    }

    /// Get cookies matching the URL with proper domain suffix matching.
    ///
    /// Results are ordered the way browsers serialize them: longer paths
    /// first, then earlier creation time.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let mut result = Vec::new();
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        if host.is_empty() {
            return result;
        }
        let now = OffsetDateTime::now_utc();

        for domain in Self::get_matching_domains(&host) {
            if let Some(entry) = self.store.get(&domain) {
                for cookie in entry.iter() {
                    if !domain_matches(&cookie.domain, &host, cookie.host_only) {
                        continue;
                    }

                    if !path_matches(&cookie.path, url.path()) {
                        continue;
                    }

                    if cookie.secure && url.scheme() != "https" {
                        continue;
                    }

                    if cookie.is_expired(now) {
                        continue;
                    }

                    result.push(cookie.clone());
                }
            }
        }

        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    /// The jar's own `Cookie` header string for `url`, or `""`.
    pub fn get_cookie_header(&self, url: &Url) -> String {
        self.get_cookies_for_url(url)
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Get all domains to check for a given host.
    /// Returns the host itself and all parent domains.
    fn get_matching_domains(host: &str) -> Vec<String> {
        let mut domains = vec![host.to_string()];

        // "foo.bar.example.com" -> "bar.example.com", "example.com"
        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }

        domains
    }

    /// Parse a `Set-Cookie` line received from `url` and store it.
    ///
    /// Returns whether the cookie was stored. Lines are refused while the
    /// jar does not accept cookies, when unparseable, when the Domain
    /// attribute is a public suffix or foreign to `url`, and when a
    /// `__Secure-`/`__Host-` prefix is not honoured.
    pub fn parse_and_save_cookie(&self, url: &Url, cookie_line: &str) -> bool {
        use cookie::Cookie;

        if !self.accept_cookie() {
            return false;
        }

        let parsed = match Cookie::parse(cookie_line) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting unparseable Set-Cookie line");
                return false;
            }
        };
        if parsed.name().is_empty() {
            return false;
        }

        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        let now = OffsetDateTime::now_utc();

        let (domain, host_only) = if let Some(d) = parsed.domain() {
            let d = strip_leading_dot(d).to_ascii_lowercase();

            // Reject cookies set on public suffixes (supercookies).
            if !crate::cookies::psl::is_valid_cookie_domain(&d, &host) {
                tracing::debug!(host = %host, domain = %d, "rejecting cookie for foreign domain");
                return false;
            }

            (d, false)
        } else {
            (host, true)
        };

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(url.path()),
        };

        let expiration_time = match parsed.max_age() {
            Some(max_age) => Some(now + max_age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        let cookie = CanonicalCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            creation_time: now,
            expiration_time,
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            host_only,
        };

        if !cookie.has_valid_prefix(url.scheme() == "https") {
            return false;
        }

        // An already-expired cookie deletes any stored one it would replace.
        if cookie.is_expired(now) || cookie.expiration_time == Some(now) {
            self.remove_cookie(&cookie);
            return false;
        }

        self.set_canonical_cookie(cookie);
        true
    }

    fn remove_cookie(&self, cookie: &CanonicalCookie) {
        let key = strip_leading_dot(&cookie.domain).to_ascii_lowercase();
        if let Some(mut entry) = self.store.get_mut(&key) {
            entry.retain(|c| !same_identity(c, cookie));
        }
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Iterate over all cookies (for persistence).
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }

    /// Import cookies from Netscape format file content (curl/wget
    /// `cookies.txt`). Returns how many lines were imported.
    ///
    /// Each line has the format:
    /// `domain\tinclude_subdomains\tpath\tsecure\texpiry\tname\tvalue`
    pub fn import_netscape(&self, content: &str) -> usize {
        let mut count = 0;
        let now = OffsetDateTime::now_utc();

        for line in content.lines() {
            // curl marks HttpOnly cookies with this prefix on the domain field.
            let (line, http_only) = match line.trim().strip_prefix("#HttpOnly_") {
                Some(rest) => (rest, true),
                None => (line.trim(), false),
            };

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 7 || parts[5].is_empty() {
                continue;
            }

            let expiry: i64 = parts[4].parse().unwrap_or(0);
            let expiration_time = if expiry > 0 {
                OffsetDateTime::from_unix_timestamp(expiry).ok()
            } else {
                None
            };

            self.set_canonical_cookie(CanonicalCookie {
                name: parts[5].to_string(),
                value: parts[6].to_string(),
                domain: strip_leading_dot(parts[0]).to_string(),
                path: parts[2].to_string(),
                creation_time: now,
                expiration_time,
                secure: parts[3].eq_ignore_ascii_case("TRUE"),
                http_only,
                host_only: parts[1].eq_ignore_ascii_case("FALSE"),
            });
            count += 1;
        }

        count
    }
}

/// Two cookies occupy the same jar slot.
fn same_identity(a: &CanonicalCookie, b: &CanonicalCookie) -> bool {
    a.name == b.name
        && a.path == b.path
        && a.host_only == b.host_only
        && strip_leading_dot(&a.domain).eq_ignore_ascii_case(strip_leading_dot(&b.domain))
}

/// RFC 6265 §5.1.4 default-path.
fn default_path(request_path: &str) -> String {
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

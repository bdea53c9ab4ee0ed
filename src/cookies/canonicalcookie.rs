use time::OffsetDateTime;

/// Represents a cookie as held by any of the stores.
/// Modeled after Chromium's `net::CanonicalCookie`, trimmed to what header
/// synthesis needs.
///
/// `domain` is kept exactly as the store reports it: empty or a bare host for
/// host-only cookies, or with a leading `.` for domain cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
}

impl CanonicalCookie {
    /// A session cookie with path `/`. Host-only unless `domain` starts with `.`.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        let domain = domain.into();
        Self {
            name: name.into(),
            value: value.into(),
            host_only: !domain.starts_with('.'),
            domain,
            path: "/".to_string(),
            creation_time: OffsetDateTime::now_utc(),
            expiration_time: None,
            secure: false,
            http_only: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_expiration(mut self, expiration_time: OffsetDateTime) -> Self {
        self.expiration_time = Some(expiration_time);
        self
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        if let Some(expiry) = self.expiration_time {
            expiry < current_time
        } else {
            false
        }
    }

    /// Check `__Secure-` and `__Host-` name prefixes per RFC 6265bis.
    /// - `__Secure-` cookies MUST have the Secure attribute
    /// - `__Host-` cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn has_valid_prefix(&self, secure_origin: bool) -> bool {
        if self.name.starts_with("__Secure-") && (!self.secure || !secure_origin) {
            return false;
        }

        if self.name.starts_with("__Host-")
            && (!self.secure || self.path != "/" || !self.host_only || !secure_origin)
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_infers_host_only() {
        assert!(CanonicalCookie::new("a", "1", "example.com").host_only);
        assert!(!CanonicalCookie::new("a", "1", ".example.com").host_only);
    }

    #[test]
    fn test_is_expired() {
        let now = OffsetDateTime::now_utc();
        let past = CanonicalCookie::new("a", "1", "example.com")
            .with_expiration(now - time::Duration::hours(1));
        let future = CanonicalCookie::new("b", "2", "example.com")
            .with_expiration(now + time::Duration::hours(1));

        assert!(past.is_expired(now));
        assert!(!future.is_expired(now));
        assert!(!CanonicalCookie::new("c", "3", "example.com").is_expired(now));
    }

    #[test]
    fn test_host_prefix_requires_secure_host_only() {
        let ok = CanonicalCookie::new("__Host-id", "1", "example.com").with_secure(true);
        assert!(ok.has_valid_prefix(true));
        assert!(!ok.has_valid_prefix(false));

        let domain = CanonicalCookie::new("__Host-id", "1", ".example.com").with_secure(true);
        assert!(!domain.has_valid_prefix(true));
    }

    #[test]
    fn test_secure_prefix_requires_secure() {
        let insecure = CanonicalCookie::new("__Secure-id", "1", "example.com");
        assert!(!insecure.has_valid_prefix(true));
    }
}

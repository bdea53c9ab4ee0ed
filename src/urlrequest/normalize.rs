//! Turns whatever the caller passed as "the URL" into something a cookie
//! store can be asked about.
//!
//! Normalization never fails. Input that will not parse degrades to a
//! best-effort host so the rest of the pipeline can still run (and usually
//! find nothing).

use std::fmt;
use url::Url;

/// Scheme assumed when the input has none.
pub const DEFAULT_SCHEME: &str = "https";

/// A raw URL string after normalization.
///
/// `scheme` is never empty. `host` is lower-cased with no port, userinfo or
/// path, and is empty when nothing usable could be extracted.
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    scheme: String,
    host: String,
    original: String,
    effective: String,
    url: Option<Url>,
}

impl NormalizedUrl {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The string exactly as the caller supplied it.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The URL string actually used, after any scheme was prepended.
    pub fn effective(&self) -> &str {
        &self.effective
    }

    /// The parsed URL, absent on the degrade path.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// True when the caller passed an empty (or all-whitespace) string.
    pub fn is_empty_input(&self) -> bool {
        self.original.trim().is_empty()
    }

    fn from_url(original: &str, url: Url) -> Self {
        Self {
            scheme: url.scheme().to_string(),
            host: url.host_str().unwrap_or("").to_ascii_lowercase(),
            original: original.to_string(),
            effective: url.as_str().to_string(),
            url: Some(url),
        }
    }
}

impl fmt::Debug for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedUrl")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("effective", &self.effective)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.effective)
    }
}

/// Normalize with [`DEFAULT_SCHEME`].
pub fn normalize(raw: &str) -> NormalizedUrl {
    normalize_with_scheme(raw, DEFAULT_SCHEME)
}

/// Normalize `raw`, prepending `default_scheme://` when it has no scheme.
///
/// 1. Parse `raw`. Keep it if it has a scheme and is not a bare
///    `host:port` that the URL parser mistook for `scheme:path`.
/// 2. Otherwise parse `default_scheme://raw`.
/// 3. If that fails too, pull the host out of `raw` by hand.
pub fn normalize_with_scheme(raw: &str, default_scheme: &str) -> NormalizedUrl {
    let default_scheme = if default_scheme.is_empty() {
        DEFAULT_SCHEME
    } else {
        default_scheme
    };
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return NormalizedUrl {
            scheme: default_scheme.to_string(),
            host: String::new(),
            original: raw.to_string(),
            effective: String::new(),
            url: None,
        };
    }

    if let Ok(url) = Url::parse(trimmed) {
        if !url.scheme().is_empty() && !is_mistaken_scheme(trimmed, &url) {
            return NormalizedUrl::from_url(raw, url);
        }
    }

    let prefixed = format!("{}://{}", default_scheme, trimmed);
    match Url::parse(&prefixed) {
        Ok(url) => NormalizedUrl::from_url(raw, url),
        Err(e) => {
            tracing::debug!(error = %e, "URL did not parse, extracting host best-effort");
            NormalizedUrl {
                scheme: default_scheme.to_string(),
                host: extract_host(trimmed),
                original: raw.to_string(),
                effective: prefixed,
                url: None,
            }
        }
    }
}

/// `example.com:8080/path` parses as scheme `example.com` with no host.
/// Without `://`, without a host, and with a port after the colon, the input
/// was meant to be schemeless. Opaque URLs such as `mailto:` are kept.
fn is_mistaken_scheme(raw: &str, url: &Url) -> bool {
    if url.host_str().is_some() || raw.contains("://") {
        return false;
    }

    raw.split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Authority host of `raw` without scheme, userinfo, port or path.
fn extract_host(raw: &str) -> String {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    let host = if authority.starts_with('[') {
        match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        }
    } else {
        authority.split(':').next().unwrap_or("")
    };

    host.to_ascii_lowercase()
}

//! Source backed by the embedded engine's jar.

use super::{CookieSource, Querying};
use crate::cookies::monster::CookieMonster;
use crate::urlrequest::NormalizedUrl;
use std::sync::Arc;

/// Hands the URL to a [`CookieMonster`] and returns whatever it decides is
/// relevant. No matching happens here.
///
/// The jar's accept-cookies setting is switched on before every query, the
/// way an Android `CookieManager` has to be before it is read.
#[derive(Debug, Clone)]
pub struct DelegatedSource {
    label: String,
    jar: Arc<CookieMonster>,
}

impl DelegatedSource {
    pub fn new(jar: Arc<CookieMonster>) -> Self {
        Self::with_label("webview-jar", jar)
    }

    pub fn with_label(label: impl Into<String>, jar: Arc<CookieMonster>) -> Self {
        Self {
            label: label.into(),
            jar,
        }
    }

    pub fn jar(&self) -> &Arc<CookieMonster> {
        &self.jar
    }
}

impl CookieSource for DelegatedSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn query(&self, target: &NormalizedUrl) -> Querying {
        let jar = self.jar.clone();
        let url = target.url().cloned();

        Box::pin(async move {
            jar.set_accept_cookie(true);

            // Nothing to ask the jar about on the degrade path.
            let Some(url) = url else {
                return Ok(Vec::new());
            };

            Ok(jar.get_cookies_for_url(&url))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urlrequest::normalize;

    #[tokio::test]
    async fn test_enables_accept_cookie_before_query() {
        let jar = Arc::new(CookieMonster::new());
        let url = url::Url::parse("https://example.com/").unwrap();
        jar.parse_and_save_cookie(&url, "sid=1");
        jar.set_accept_cookie(false);

        let source = DelegatedSource::new(jar.clone());
        let cookies = source.query(&normalize("example.com")).await.unwrap();

        assert!(jar.accept_cookie());
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "sid");
    }

    #[tokio::test]
    async fn test_jar_applies_host_only() {
        let jar = Arc::new(CookieMonster::new());
        let url = url::Url::parse("https://example.com/").unwrap();
        jar.parse_and_save_cookie(&url, "hostonly=1");

        let source = DelegatedSource::new(jar);
        let cookies = source.query(&normalize("www.example.com")).await.unwrap();
        assert!(cookies.is_empty());
    }

    #[tokio::test]
    async fn test_degraded_url_returns_nothing() {
        let source = DelegatedSource::new(Arc::new(CookieMonster::new()));
        let cookies = source.query(&normalize("exa mple.com")).await.unwrap();
        assert!(cookies.is_empty());
    }
}

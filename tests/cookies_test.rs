use cookieheader::cookies::canonicalcookie::CanonicalCookie;
use cookieheader::cookies::monster::CookieMonster;
use cookieheader::cookies::persistence::{load_cookies, save_cookies};
use cookieheader::cookies::psl::{is_public_suffix, is_valid_cookie_domain};
use tempfile::tempdir;
use url::Url;

#[test]
fn test_parse_and_save() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/foo").unwrap();
    assert!(store.parse_and_save_cookie(&url, "foo=bar; Path=/"));

    let cookies = store.get_cookies_for_url(&url);
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[0].value, "bar");
    assert_eq!(cookies[0].path, "/");
}

#[test]
fn test_domain_matching() {
    let store = CookieMonster::new();
    let url = Url::parse("https://a.example.com").unwrap();

    store.parse_and_save_cookie(&url, "host=val");
    store.parse_and_save_cookie(&url, "domain=val; Domain=example.com");

    let cookies = store.get_cookies_for_url(&url);
    assert!(cookies.iter().any(|c| c.name == "host"));
    assert!(cookies.iter().any(|c| c.name == "domain"));

    // Host-only cookies stay on their host; domain cookies reach siblings.
    let sibling = Url::parse("https://b.example.com").unwrap();
    let cookies = store.get_cookies_for_url(&sibling);
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "domain");

    let lookalike = Url::parse("https://notexample.com").unwrap();
    assert!(store.get_cookies_for_url(&lookalike).is_empty());
}

#[test]
fn test_path_matching() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/foo/bar").unwrap();

    store.parse_and_save_cookie(&url, "root=val; Path=/");
    store.parse_and_save_cookie(&url, "foo=val; Path=/foo");
    store.parse_and_save_cookie(&url, "baz=val; Path=/baz");

    let cookies = store.get_cookies_for_url(&url);
    assert_eq!(cookies.len(), 2);
    // Longer paths first.
    assert_eq!(cookies[0].name, "foo");
    assert_eq!(cookies[1].name, "root");
}

#[test]
fn test_secure_flag() {
    let store = CookieMonster::new();
    let https_url = Url::parse("https://example.com").unwrap();
    let http_url = Url::parse("http://example.com").unwrap();

    store.parse_and_save_cookie(&https_url, "sec=saved; Secure");

    assert_eq!(store.get_cookies_for_url(&https_url).len(), 1);
    assert_eq!(store.get_cookies_for_url(&http_url).len(), 0);
}

#[test]
fn test_supercookie_rejected() {
    let store = CookieMonster::new();
    let url = Url::parse("https://www.example.co.uk").unwrap();

    assert!(!store.parse_and_save_cookie(&url, "a=1; Domain=co.uk"));
    assert!(store.parse_and_save_cookie(&url, "b=1; Domain=example.co.uk"));
    assert_eq!(store.total_cookie_count(), 1);
}

#[test]
fn test_refused_while_not_accepting() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com").unwrap();

    store.set_accept_cookie(false);
    assert!(!store.parse_and_save_cookie(&url, "a=1"));
    store.set_accept_cookie(true);
    assert!(store.parse_and_save_cookie(&url, "a=1"));
}

#[test]
fn test_max_age_zero_deletes() {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com").unwrap();

    store.parse_and_save_cookie(&url, "sid=1");
    assert_eq!(store.get_cookie_header(&url), "sid=1");

    assert!(!store.parse_and_save_cookie(&url, "sid=1; Max-Age=0"));
    assert_eq!(store.get_cookie_header(&url), "");
}

#[test]
fn test_import_netscape() {
    let store = CookieMonster::new();
    let content = "# Netscape HTTP Cookie File\n\
                   .example.com\tTRUE\t/\tFALSE\t0\tsid\tabc\n\
                   #HttpOnly_www.example.com\tFALSE\t/\tTRUE\t0\ttok\txyz\n\
                   broken line\n";

    assert_eq!(store.import_netscape(content), 2);

    let url = Url::parse("https://www.example.com/").unwrap();
    let cookies = store.get_cookies_for_url(&url);
    assert_eq!(cookies.len(), 2);
    let tok = cookies.iter().find(|c| c.name == "tok").unwrap();
    assert!(tok.http_only);
    assert!(tok.secure);
}

#[test]
fn test_persistence_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jar.json");

    let store = CookieMonster::new();
    store.set_canonical_cookie(CanonicalCookie::new("a", "1", ".example.com").with_path("/app"));
    save_cookies(&store, &path).unwrap();

    let loaded = load_cookies(&path).unwrap();
    let url = Url::parse("https://example.com/app/page").unwrap();
    assert_eq!(loaded.get_cookie_header(&url), "a=1");
}

#[test]
fn test_public_suffix_helpers() {
    assert!(is_public_suffix("com"));
    assert!(is_public_suffix("co.uk"));
    assert!(!is_public_suffix("example.com"));

    assert!(is_valid_cookie_domain("example.com", "www.example.com"));
    assert!(!is_valid_cookie_domain("com", "www.example.com"));
    assert!(!is_valid_cookie_domain("other.com", "www.example.com"));
}

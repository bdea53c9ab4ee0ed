use crate::base::storeerror::StoreError;
use std::time::Duration;

#[test]
fn test_transient_errors() {
    assert!(StoreError::DatabaseLocked.is_transient());
    assert!(StoreError::TimedOut(Duration::from_secs(2)).is_transient());
    assert!(!StoreError::invalid_data("bad magic").is_transient());
    assert!(!StoreError::unavailable("webview").is_transient());
}

#[test]
fn test_error_messages() {
    let err = StoreError::file_not_found("/tmp/Cookies");
    assert_eq!(err.to_string(), "Cookie store file not found: /tmp/Cookies");

    let err = StoreError::panicked("chromium-db");
    assert_eq!(err.to_string(), "Cookie store query task failed: chromium-db panicked");

    let err = StoreError::TimedOut(Duration::from_millis(1500));
    assert_eq!(err.to_string(), "Cookie store query timed out after 1.5s");

    let err = StoreError::unavailable("webview-jar");
    assert_eq!(err.to_string(), "Cookie store unavailable: webview-jar");
}

#[test]
fn test_json_error_maps_to_invalid_data() {
    let err: StoreError = serde_json::from_str::<Vec<u8>>("not json")
        .unwrap_err()
        .into();
    assert!(matches!(err, StoreError::InvalidData { .. }));
}

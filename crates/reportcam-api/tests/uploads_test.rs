mod helpers;

use helpers::*;
use reportcam_core::SignedUploadAuthorization;
use serde_json::Value;

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[tokio::test]
async fn test_issue_signature() {
    let app = setup_test_app(signing_config());

    let before = unix_now();
    let response = app.client().post(&api_path("/uploads/signature")).await;
    let after = unix_now();

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let object = body.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["apiKey", "folder", "signature", "source", "tags", "timestamp"]
    );
    assert_eq!(body["apiKey"], TEST_API_KEY);
    assert_eq!(body["folder"], "accident_reports");
    assert_eq!(body["tags"], "user_upload, accident_report");
    assert_eq!(body["source"], "uw");

    let authorization: SignedUploadAuthorization = serde_json::from_value(body).unwrap();
    assert!(authorization.timestamp >= before && authorization.timestamp <= after);
    assert_eq!(authorization.signature.len(), 40);
    assert!(app.state.issuer.verify(&authorization).unwrap());
}

#[tokio::test]
async fn test_signature_is_reproducible_from_timestamp() {
    let app = setup_test_app(signing_config());

    let response = app.client().post(&api_path("/uploads/signature")).await;
    let authorization: SignedUploadAuthorization = response.json();

    let again = app.state.issuer.issue_at(authorization.timestamp).unwrap();
    assert_eq!(again, authorization);
}

#[tokio::test]
async fn test_signature_is_not_served_on_get() {
    let app = setup_test_app(signing_config());

    let response = app.client().get(&api_path("/uploads/signature")).await;
    assert_eq!(response.status_code(), 405);
    assert!(!response.text().contains("signature"));
}

#[tokio::test]
async fn test_signature_is_not_cacheable() {
    let app = setup_test_app(signing_config());

    let response = app.client().post(&api_path("/uploads/signature")).await;
    assert_eq!(response.header("cache-control"), "no-store");
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_signature_without_credentials_fails() {
    let app = setup_test_app(unsigned_config());

    let response = app.client().post(&api_path("/uploads/signature")).await;
    assert_eq!(response.status_code(), 500);
    assert_eq!(response.header("cache-control"), "no-store");

    let body: Value = response.json();
    assert_eq!(body["code"], "CONFIGURATION_ERROR");
    assert_eq!(body["recoverable"], false);
    assert!(body.get("signature").is_none());
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_widget_config_is_public_only() {
    let app = setup_test_app(signing_config());

    let response = app.client().get(&api_path("/uploads/widget-config")).await;
    assert_eq!(response.status_code(), 200);

    let text = response.text();
    assert!(!text.contains(TEST_SECRET));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["cloudName"], TEST_CLOUD_NAME);
    assert_eq!(body["uploadPreset"], TEST_UPLOAD_PRESET);
    assert_eq!(body["apiKey"], TEST_API_KEY);
    assert_eq!(body["mapsApiKey"], "maps-public-key");
    assert_eq!(body["folder"], "accident_reports");
    assert_eq!(body["maxFiles"], 5);
    assert_eq!(body["sources"], serde_json::json!(["local", "camera"]));
    assert!(body["scriptUrl"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_widget_config_without_credentials() {
    let app = setup_test_app(unsigned_config());

    let response = app.client().get(&api_path("/uploads/widget-config")).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["cloudName"], TEST_CLOUD_NAME);
    assert!(body["apiKey"].is_null());
    assert!(body.get("mapsApiKey").is_none());
}

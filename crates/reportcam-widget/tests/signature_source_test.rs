mod helpers;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use helpers::*;
use reportcam_widget::signature::SIGNATURE_PATH;
use reportcam_widget::{HttpSignatureSource, SignatureSource, SignatureSourceError};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_http_source_decodes_authorization() {
    let issued = test_issuer(Some(TEST_SECRET)).issue().unwrap();
    let body = issued.clone();
    let base_url = serve(Router::new().route(
        SIGNATURE_PATH,
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    ))
    .await;

    let source = HttpSignatureSource::new(&base_url).unwrap();
    let authorization = source.fetch_signature().await.unwrap();

    assert_eq!(authorization, issued);
    assert_eq!(authorization.signature, TEST_SIGNATURE);
    assert_eq!(authorization.timestamp, TEST_TIMESTAMP);
}

#[tokio::test]
async fn test_http_source_reports_error_status_with_body() {
    let base_url = serve(Router::new().route(
        SIGNATURE_PATH,
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "signing unavailable") }),
    ))
    .await;

    let source = HttpSignatureSource::new(&base_url).unwrap();
    let err = source.fetch_signature().await.unwrap_err();

    match err {
        SignatureSourceError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "signing unavailable");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_source_rejects_malformed_body() {
    let base_url = serve(Router::new().route(
        SIGNATURE_PATH,
        post(|| async { Json(serde_json::json!({ "unexpected": true })) }),
    ))
    .await;

    let source = HttpSignatureSource::new(&base_url).unwrap();
    let err = source.fetch_signature().await.unwrap_err();
    assert!(matches!(err, SignatureSourceError::Request(_)));
}

//! Wiremock integration tests for `predict` and `history`.

use std::time::Duration;

use wiremock::matchers::{header_regex, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use landmark_client::{
    ClientConfig, ImageReference, LandmarkError, Platform, RemoteClient,
};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRfake-png-body";
const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIFfake-jpeg-body";

/// Sample predict response with three ranked labels.
fn sample_prediction_json() -> serde_json::Value {
    serde_json::json!({
        "predictions": [
            {"label": "Wat Arun", "confidence": 0.87},
            {"label": "Grand Palace", "confidence": 0.09},
            {"label": "Wat Pho", "confidence": 0.03}
        ],
        "image_id": "c0ffee",
        "processing_time_ms": 118
    })
}

fn client_for(server: &MockServer, platform: Platform) -> RemoteClient {
    RemoteClient::builder()
        .base_url(server.uri())
        .platform(platform)
        .build()
        .expect("client should build")
}

/// Matches a multipart body carrying one `imageFile` part with the given
/// file name and content type.
struct ImageFilePart {
    file_name: &'static str,
    content_type: &'static str,
}

impl Match for ImageFilePart {
    fn matches(&self, request: &Request) -> bool {
        let body = String::from_utf8_lossy(&request.body);
        let disposition = format!(
            "Content-Disposition: form-data; name=\"imageFile\"; filename=\"{}\"",
            self.file_name
        );
        let content_type = format!("Content-Type: {}", self.content_type);
        body.matches("name=\"imageFile\"").count() == 1
            && body.contains(&disposition)
            && body.contains(&content_type)
    }
}

async fn mount_predict(server: &MockServer, file_name: &'static str, content_type: &'static str) {
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header_regex("content-type", "^multipart/form-data; boundary=.+"))
        .and(ImageFilePart {
            file_name,
            content_type,
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction_json()))
        .expect(1)
        .mount(server)
        .await;
}

// =============================================================================
// predict
// =============================================================================

#[tokio::test]
async fn browser_png_upload_is_typed_png() {
    let server = MockServer::start().await;
    mount_predict(&server, "photo.png", "image/png").await;

    let client = client_for(&server, Platform::Browser);
    let result = client
        .predict(&ImageReference::blob(PNG_BYTES))
        .await
        .expect("predict should succeed");

    assert_eq!(result.predictions.len(), 3);
    assert_eq!(result.top().unwrap().label, "Wat Arun");
    assert_eq!(result.metadata["image_id"], "c0ffee");
}

#[tokio::test]
async fn browser_jpeg_upload_is_typed_jpeg() {
    let server = MockServer::start().await;
    mount_predict(&server, "photo.jpg", "image/jpeg").await;

    let client = client_for(&server, Platform::Browser);
    client
        .predict(&ImageReference::blob(JPEG_BYTES))
        .await
        .expect("predict should succeed");
}

#[tokio::test]
async fn browser_unrecognised_upload_defaults_to_jpeg() {
    let server = MockServer::start().await;
    mount_predict(&server, "photo.jpg", "image/jpeg").await;

    let client = client_for(&server, Platform::Browser);
    client
        .predict(&ImageReference::blob(b"plain bytes".to_vec()))
        .await
        .expect("predict should succeed");
}

#[tokio::test]
async fn native_upload_uses_file_name_and_extension() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("IMG_2041.png");
    std::fs::write(&image_path, PNG_BYTES).unwrap();

    let server = MockServer::start().await;
    mount_predict(&server, "IMG_2041.png", "image/png").await;

    let client = client_for(&server, Platform::Native);
    let uri = format!("file://{}", image_path.display());
    client
        .predict(&ImageReference::from_uri(&uri))
        .await
        .expect("predict should succeed");
}

#[tokio::test]
async fn native_upload_without_extension_defaults_to_jpeg() {
    let server = MockServer::start().await;
    mount_predict(&server, "photo.jpg", "image/jpeg").await;

    let client = client_for(&server, Platform::Native);
    client
        .predict(&ImageReference::blob(JPEG_BYTES))
        .await
        .expect("predict should succeed");
}

#[tokio::test]
async fn predict_server_error_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Platform::Browser);
    let err = client
        .predict(&ImageReference::blob(JPEG_BYTES))
        .await
        .unwrap_err();

    match err {
        LandmarkError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "model not loaded");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn predict_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Platform::Browser);
    let err = client
        .predict(&ImageReference::blob(JPEG_BYTES))
        .await
        .unwrap_err();
    assert!(matches!(err, LandmarkError::Json(_)));
}

#[tokio::test]
async fn predict_missing_file_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_prediction_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Platform::Native);
    let err = client
        .predict(&ImageReference::file("/nonexistent/IMG_0001.jpg"))
        .await
        .unwrap_err();
    assert!(matches!(err, LandmarkError::InvalidInput(_)));
}

#[tokio::test]
async fn predict_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_prediction_json())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = RemoteClient::builder()
        .base_url(server.uri())
        .platform(Platform::Browser)
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client
        .predict(&ImageReference::blob(JPEG_BYTES))
        .await
        .unwrap_err();

    assert!(matches!(err, LandmarkError::Timeout(d) if d == Duration::from_millis(200)));
    assert!(err.is_transient());
}

// =============================================================================
// history
// =============================================================================

fn sample_history_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 42,
            "created_at": "2024-11-02T09:15:00Z",
            "predictions": [{"label": "Wat Arun", "confidence": 0.87}],
            "image_url": "/uploads/42.jpg"
        },
        {
            "id": 41,
            "created_at": "2024-11-01T17:40:00Z",
            "predictions": []
        }
    ])
}

#[tokio::test]
async fn history_defaults_to_twenty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_history_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Platform::Native);
    let records = client.history(None).await.expect("history should succeed");

    // server order preserved
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, Some(serde_json::json!(42)));
    assert_eq!(records[1].id, Some(serde_json::json!(41)));
    assert_eq!(records[0].extra["image_url"], "/uploads/42.jpg");
}

#[tokio::test]
async fn history_passes_explicit_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Platform::Native);
    let records = client.history(Some(5)).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn history_limit_is_not_validated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(query_param("limit", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Platform::Native);
    assert!(client.history(Some(0)).await.is_ok());
}

#[tokio::test]
async fn history_not_found_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, Platform::Native);
    let err = client.history(None).await.unwrap_err();
    match err {
        LandmarkError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn explicit_endpoint_urls_are_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/records"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(
        format!("{}/v2/classify", server.uri()),
        format!("{}/v2/records", server.uri()),
        format!("{}/v2/ping", server.uri()),
    );
    let client = RemoteClient::new(config).unwrap();
    client.history(Some(3)).await.unwrap();
}

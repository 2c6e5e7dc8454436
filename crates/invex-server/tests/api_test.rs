//! HTTP API tests driving the router in-process.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use invex_core::pdf::testing::build_pdf;
use invex_core::{InvexConfig, LayoutProfile};
use invex_server::{AppState, create_server};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

const TABLE_ROW: &str = "123456789 54321 01.02.2024 - 29.02.2024 01.03.2024";
const BOUNDARY: &str = "invex-test-boundary";

fn app() -> Router {
    create_server(AppState::default())
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn multipart_body(file: Option<&[u8]>, extra_fields: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(data) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"invoice.pdf\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(fields) = extra_fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"extra_fields\"\r\n\r\n\
                 {fields}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/extract")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_home() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "Invoice Extraction Server Running Successfully!"
    );
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["profile"], "tabular");
}

#[tokio::test]
async fn test_missing_document() {
    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_string(response).await, r#"{"error":"No file uploaded"}"#);
}

#[tokio::test]
async fn test_multipart_without_file() {
    let request = multipart_request(multipart_body(None, Some("Tax")));
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file uploaded");
}

#[tokio::test]
async fn test_raw_body_upload() {
    let pdf = build_pdf(&[TABLE_ROW]);
    let request = Request::builder()
        .method("POST")
        .uri("/extract?extra_fields=Tax%2C%20Net")
        .header(CONTENT_TYPE, "application/pdf")
        .body(Body::from(pdf))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["invoice_number"], "123456789");
    assert_eq!(json["customer_id"], "54321");
    assert_eq!(json["invoice_period"], "01.02.2024 - 29.02.2024");
    assert_eq!(json["gross_amount_incl_vat"], "Not found");
    assert_eq!(json["Tax"], "Not found");
    assert_eq!(json["Net"], "Not found");
    assert_eq!(json.as_object().unwrap().len(), 7);
}

#[tokio::test]
async fn test_multipart_upload_deduplicates_fields() {
    let pdf = build_pdf(&[TABLE_ROW]);
    let request = multipart_request(multipart_body(Some(&pdf), Some("Tax, Tax")));
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert_eq!(body.matches("\"Tax\"").count(), 1);
    assert!(body.starts_with(r#"{"invoice_number":"123456789""#));
    assert!(body.ends_with(r#""Tax":"Not found"}"#));
}

#[tokio::test]
async fn test_profile_from_query() {
    let pdf = build_pdf(&["Invoice No: INV-777", "Customer Number: C-99"]);
    let request = Request::builder()
        .method("POST")
        .uri("/extract?profile=labeled")
        .body(Body::from(pdf))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["invoice_number"], "INV-777");
    assert_eq!(json["customer_id"], "C-99");
}

#[tokio::test]
async fn test_configured_profile() {
    let mut config = InvexConfig::default();
    config.extraction.profile = LayoutProfile::Labeled;
    let app = create_server(AppState::new(config));

    let pdf = build_pdf(&["Invoice No: INV-1"]);
    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .body(Body::from(pdf))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["invoice_number"], "INV-1");
}

#[tokio::test]
async fn test_unknown_profile() {
    let request = Request::builder()
        .method("POST")
        .uri("/extract?profile=columns")
        .body(Body::from(build_pdf(&[TABLE_ROW])))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("columns"));
}

#[tokio::test]
async fn test_unreadable_document() {
    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .body(Body::from("this is not a pdf"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["error"].as_str().unwrap().starts_with("PDF error"));
}

#[tokio::test]
async fn test_upload_too_large() {
    let mut config = InvexConfig::default();
    config.server.max_upload_bytes = 16;
    let app = create_server(AppState::new(config));

    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .body(Body::from(vec![b'x'; 64]))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

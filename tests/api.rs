//! Router-level tests that never reach PostgreSQL.

mod common;

use axum::http::{Method, StatusCode, header};
use serde_json::json;

use common::{
    MemoryStorage, PNG_DATA_URL, Part, body_json, build_test_app, get, offline_pool, post_json,
    post_multipart, send,
};

#[tokio::test]
async fn health_reports_degraded_when_database_is_down() {
    let storage = MemoryStorage::new();
    let app = build_test_app(offline_pool(), storage);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "DEGRADED");
    assert_eq!(body["database"], "DOWN");
    assert_eq!(body["storage"], "UP");
    assert_eq!(body["storage_type"], "minio");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = get(app, "/health").await;

    let headers = response.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = get(app, "/api/donations").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = send(
        app,
        axum::http::Request::post("/api/reviews")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request data"));
}

#[tokio::test]
async fn missing_required_field_is_rejected() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = post_json(app, "/api/news", json!({ "title_en": "Spring open day" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("content_en"));
}

#[tokio::test]
async fn malformed_data_url_is_rejected_before_upload() {
    let storage = MemoryStorage::new();
    let app = build_test_app(offline_pool(), storage.clone());

    let response = post_json(
        app,
        "/api/news",
        json!({
            "title_en": "Spring open day",
            "content_en": "Come and meet the herd.",
            "image_data": "data:image/png,not-base64"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(storage.put_keys().is_empty());
}

#[tokio::test]
async fn gallery_item_requires_an_image() {
    let storage = MemoryStorage::new();
    let app = build_test_app(offline_pool(), storage.clone());

    let response = post_json(app, "/api/gallery", json!({ "image_data": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(storage.put_keys().is_empty());
}

#[tokio::test]
async fn storage_outage_fails_create_without_writing() {
    let storage = MemoryStorage::failing();
    let app = build_test_app(offline_pool(), storage.clone());

    let response = post_json(app, "/api/gallery", json!({ "image_data": PNG_DATA_URL })).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn user_lookup_requires_token() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = get(app, "/api/user/1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_lookup_rejects_forged_token() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = send(
        app,
        axum::http::Request::get("/api/user/1")
            .header(header::AUTHORIZATION, "Bearer not.a.token")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn standalone_image_upload_returns_public_url() {
    let storage = MemoryStorage::new();
    let app = build_test_app(offline_pool(), storage.clone());

    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let response = post_multipart(
        app,
        Method::POST,
        "/api/upload-image",
        &[Part::File {
            name: "image",
            file_name: "cow.png",
            content_type: "image/png",
            data: &png,
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let keys = storage.put_keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with("uploads/") && keys[0].ends_with(".png"));

    let body = body_json(response).await;
    assert_eq!(
        body["image_url"],
        format!("http://minio:9000/cows-shelter/{}", keys[0])
    );
}

#[tokio::test]
async fn standalone_upload_refuses_non_images() {
    let storage = MemoryStorage::new();
    let app = build_test_app(offline_pool(), storage.clone());

    let response = post_multipart(
        app,
        Method::POST,
        "/api/upload-image",
        &[Part::File {
            name: "image",
            file_name: "notes.txt",
            content_type: "text/plain",
            data: b"hello",
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(storage.put_keys().is_empty());
}

#[tokio::test]
async fn standalone_upload_without_image_part_is_bad_request() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = post_multipart(
        app,
        Method::POST,
        "/api/upload-image",
        &[Part::Text("caption", "no file here")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn document_with_disallowed_extension_is_refused() {
    let storage = MemoryStorage::new();
    let app = build_test_app(offline_pool(), storage.clone());

    let response = post_multipart(
        app,
        Method::POST,
        "/api/pdf",
        &[
            Part::Text("title", "Annual report"),
            Part::File {
                name: "document",
                file_name: "report.exe",
                content_type: "application/octet-stream",
                data: b"MZ",
            },
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(storage.put_keys().is_empty());
}

#[tokio::test]
async fn document_requires_title() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = post_multipart(
        app,
        Method::POST,
        "/api/pdf",
        &[Part::File {
            name: "document",
            file_name: "report.pdf",
            content_type: "application/pdf",
            data: b"%PDF-1.7",
        }],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn excursion_with_blank_title_is_rejected() {
    let storage = MemoryStorage::new();
    let app = build_test_app(offline_pool(), storage.clone());

    let response = post_multipart(
        app,
        Method::POST,
        "/api/excursions",
        &[
            Part::Text("title_en", "   "),
            Part::Text("description_en", "Two hours with the herd"),
            Part::Text("time_from", "10"),
            Part::Text("time_to", "12"),
            Part::Text("amount_of_persons", "Up to 10"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("title_en"));
    assert!(storage.put_keys().is_empty());
}

#[tokio::test]
async fn whitespace_only_news_fields_are_rejected() {
    let app = build_test_app(offline_pool(), MemoryStorage::new());
    let response = post_json(app, "/api/news", json!({ "title_en": "   ", "content_en": "  " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mailscout::fetcher::build_http_client;
use mailscout::server::{build_router, AppState, NO_URL_COLUMN_MESSAGE};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{mount_page, schemeless, test_config};

const BOUNDARY: &str = "mailscout-test-boundary";

fn app(mock_server: &MockServer, max_upload_bytes: usize) -> Router {
    let config = test_config(&mock_server.uri());
    let client = build_http_client(&config.fetcher).unwrap();
    build_router(AppState::new(&config, client), max_upload_bytes)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(field: &str, file_name: Option<&str>, content: &str) -> Request<Body> {
    let disposition = match file_name {
        Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
        None => format!("form-data; name=\"{}\"", field),
    };
    let body = format!(
        "--{b}\r\nContent-Disposition: {d}\r\nContent-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        d = disposition,
        c = content
    );

    Request::builder()
        .method("POST")
        .uri("/api/fetch-csv")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_health_and_index() {
    let mock_server = MockServer::start().await;
    let router = app(&mock_server, 1024 * 1024);

    let response = router
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/api/fetch-single"));
}

#[tokio::test]
async fn test_fetch_single_requires_url() {
    let mock_server = MockServer::start().await;

    for body in [json!({}), json!({ "url": "   " }), json!({ "url": null })] {
        let response = app(&mock_server, 1024)
            .oneshot(json_request("/api/fetch-single", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Please enter a URL" }));
    }
}

#[tokio::test]
async fn test_fetch_single_rejects_non_json() {
    let mock_server = MockServer::start().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/fetch-single")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("example.com"))
        .unwrap();

    let response = app(&mock_server, 1024).oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_fetch_single_success() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", r#"<a href="mailto:test@example.com">Mail</a>"#).await;

    let target = schemeless(&mock_server);
    let response = app(&mock_server, 1024)
        .oneshot(json_request(
            "/api/fetch-single",
            json!({ "url": format!("  {}  ", target) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "url": target, "email": "test@example.com", "success": true })
    );
}

#[tokio::test]
async fn test_fetch_csv_batch() {
    let mock_server = MockServer::start().await;
    let host = schemeless(&mock_server);
    mount_page(&mock_server, "/x", "<p>x@example.com</p>").await;

    let csv = format!("Site,Contact\n{host}/x,Xena\n,Nobody\n", host = host);
    let response = app(&mock_server, 1024 * 1024)
        .oneshot(multipart_request("file", Some("leads.csv"), &csv))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["total"], json!(2));
    assert_eq!(
        body["results"],
        json!([
            { "index": 1, "url": format!("{}/x", host), "email": "x@example.com", "total": 2 },
            { "index": 2, "url": "", "email": "No URL", "total": 2 }
        ])
    );

    let csv_data = body["csv_data"].as_str().unwrap();
    assert_eq!(
        csv_data.lines().collect::<Vec<_>>(),
        vec![
            "Site,Contact,email".to_string(),
            format!("{}/x,Xena,x@example.com", host),
            ",Nobody,No URL".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fetch_csv_input_errors() {
    let mock_server = MockServer::start().await;

    let cases = [
        (multipart_request("other", None, "x"), "No file provided"),
        (multipart_request("file", Some(""), "url\n"), "No file selected"),
        (
            multipart_request("file", Some("leads.txt"), "url\nexample.com\n"),
            "Please upload a CSV file",
        ),
        (multipart_request("file", Some("empty.csv"), ""), "Invalid CSV file"),
        (
            multipart_request("file", Some("people.csv"), "name,phone\nAnn,555\n"),
            NO_URL_COLUMN_MESSAGE,
        ),
    ];

    for (request, expected) in cases {
        let response = app(&mock_server, 1024 * 1024).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case: {}", expected);
        assert_eq!(body_json(response).await, json!({ "error": expected }));
    }
}

#[tokio::test]
async fn test_fetch_csv_upload_limit() {
    let mock_server = MockServer::start().await;
    let big = format!("url\n{}\n", "a".repeat(4096));

    let response = app(&mock_server, 256)
        .oneshot(multipart_request("file", Some("big.csv"), &big))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_download_csv() {
    let mock_server = MockServer::start().await;
    let csv_data = "Site,email\nexample.com,a@example.com\n";

    let response = app(&mock_server, 1024)
        .oneshot(json_request("/download-csv", json!({ "csv_data": csv_data })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"emails_extracted.csv\""
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert_eq!(body_text(response).await, csv_data);
}

#[tokio::test]
async fn test_download_csv_requires_data() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server, 1024)
        .oneshot(json_request("/download-csv", json!({ "csv_data": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "No CSV data provided" }));
}

#[tokio::test]
async fn test_download_single_csv() {
    let mock_server = MockServer::start().await;

    let response = app(&mock_server, 1024)
        .oneshot(json_request(
            "/download-single-csv",
            json!({ "url": "example.com", "email": "Not Found" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"email_result.csv\""
    );
    assert_eq!(body_text(response).await, "URL,Email\nexample.com,Not Found\n");

    let response = app(&mock_server, 1024)
        .oneshot(json_request("/download-single-csv", json!({ "email": "a@b.example" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "No URL provided" }));
}

#[tokio::test]
async fn test_apod_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Pillars of Creation",
            "date": "2024-01-15",
            "media_type": "image",
            "url": "https://apod.example/pillars.jpg",
            "explanation": "Columns of gas & dust."
        })))
        .mount(&mock_server)
        .await;

    let response = app(&mock_server, 1024)
        .oneshot(Request::get("/apod/2024-01-15").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1>Pillars of Creation</h1>"));
    assert!(html.contains("Columns of gas &amp; dust."));

    let requests = mock_server.received_requests().await.unwrap();
    let query: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(query.contains(&("date".to_string(), "2024-01-15".to_string())));
    assert!(query.contains(&("api_key".to_string(), "test-key".to_string())));
}

#[tokio::test]
async fn test_apod_upstream_failure_is_sanitized() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apod"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stack trace with secrets"))
        .mount(&mock_server)
        .await;

    let response = app(&mock_server, 1024)
        .oneshot(Request::get("/apod").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_text(response).await;
    assert!(!body.contains("secrets"));
    assert!(!body.contains("500"));
}

use async_trait::async_trait;
use axum::{body::Body, http::{Request, StatusCode}, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use signage_quote_backend::app::app::App;
use signage_quote_backend::config::AppConfig;
use signage_quote_backend::model::quote::{NewQuote, QuoteRequest};
use signage_quote_backend::repository::quote_repo::QuoteRepository;
use signage_quote_backend::repository::storage_error::{StorageError, StorageResult};
use signage_quote_backend::service::quote_service::QuoteServiceImpl;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt; // for .oneshot()

fn setup_app() -> Router {
    App::build_router(&AppConfig::default(), Arc::new(QuoteServiceImpl::in_memory()))
}

fn post_quote(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/quotes")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_quotes() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/quotes")
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, body)
}

fn scenario_a() -> Value {
    json!({
        "name": "Jo",
        "email": "jo@x.com",
        "phone": "9000376792",
        "service": "",
        "message": "Need 10 steel signs cut"
    })
}

fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_quote_returns_acknowledgement() {
    let app = setup_app();
    let (status, body) = send(&app, post_quote(&scenario_a())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Quote request submitted successfully"));
    assert_eq!(body["data"]["name"], json!("Jo"));
    assert_eq!(body["data"]["service"], json!(""));
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_quote_reports_every_invalid_field() {
    let app = setup_app();
    let payload = json!({ "name": "A", "email": "bad", "phone": "123", "message": "hi" });
    let (status, body) = send(&app, post_quote(&payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Validation"));
    assert_eq!(error_fields(&body), vec!["name", "email", "phone", "message"]);
    assert_eq!(body["errors"][0]["message"], json!("name must be at least 2 characters"));

    // Nothing was stored
    let (_, listed) = send(&app, get_quotes()).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn test_list_quotes_on_empty_store() {
    let app = setup_app();
    let (status, body) = send(&app, get_quotes()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": [] }));
}

#[tokio::test]
async fn test_concurrent_submissions_get_distinct_ids() {
    let app = setup_app();
    let mut second = scenario_a();
    second["name"] = json!("Sam");

    let (first_resp, second_resp) = tokio::join!(
        send(&app, post_quote(&scenario_a())),
        send(&app, post_quote(&second)),
    );
    assert_eq!(first_resp.0, StatusCode::CREATED);
    assert_eq!(second_resp.0, StatusCode::CREATED);
    let first_id = first_resp.1["data"]["id"].as_str().unwrap().to_string();
    let second_id = second_resp.1["data"]["id"].as_str().unwrap().to_string();
    assert_ne!(first_id, second_id);

    let (_, listed) = send(&app, get_quotes()).await;
    let ids: HashSet<String> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, HashSet::from([first_id, second_id]));
}

#[tokio::test]
async fn test_list_returns_submissions_oldest_first() {
    let app = setup_app();
    let mut submitted = Vec::new();
    for i in 0..3 {
        let mut payload = scenario_a();
        payload["name"] = json!(format!("Customer {}", i));
        payload["service"] = json!("channel-letters");
        let (status, body) = send(&app, post_quote(&payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        submitted.push((payload, body["data"]["id"].clone()));
    }

    let (status, body) = send(&app, get_quotes()).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    for (record, (payload, id)) in data.iter().zip(&submitted) {
        assert_eq!(&record["id"], id);
        for field in ["name", "email", "phone", "service", "message"] {
            assert_eq!(record[field], payload[field], "field {}", field);
        }
        assert!(record["createdAt"].is_string());
    }
}

#[tokio::test]
async fn test_service_can_be_omitted() {
    let app = setup_app();
    let mut payload = scenario_a();
    payload.as_object_mut().unwrap().remove("service");
    let (status, body) = send(&app, post_quote(&payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["service"], json!(""));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/quotes")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": \"Jo\""))
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("BadRequest"));
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported_media_type() {
    let app = setup_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/quotes")
        .body(Body::from(scenario_a().to_string()))
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], json!("UnsupportedMediaType"));
    assert_eq!(body["success"], json!(false));

    let (_, listed) = send(&app, get_quotes()).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = setup_app();
    let mut quote = scenario_a();
    quote["message"] = json!("a".repeat(3 * 1024 * 1024));
    let (status, body) = send(&app, post_quote(&quote)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], json!("PayloadTooLarge"));

    let (_, listed) = send(&app, get_quotes()).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let app = setup_app();
    let (status, body) = send(&app, post_quote(&json!(["Jo"]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_health() {
    let app = setup_app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_app();
    let req = Request::builder().uri("/api/blog").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

struct UnavailableRepository;

#[async_trait]
impl QuoteRepository for UnavailableRepository {
    async fn create(&self, _quote: NewQuote) -> StorageResult<QuoteRequest> {
        Err(StorageError::connection("mongodb://db:27017 refused connection"))
    }

    async fn list(&self) -> StorageResult<Vec<QuoteRequest>> {
        Err(StorageError::connection("mongodb://db:27017 refused connection"))
    }
}

#[tokio::test]
async fn test_storage_failure_is_opaque_internal_error() {
    let service = Arc::new(QuoteServiceImpl::new(Arc::new(UnavailableRepository)));
    let app = App::build_router(&AppConfig::default(), service);

    for req in [post_quote(&scenario_a()), get_quotes()] {
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["message"].as_str().unwrap();
        assert!(!message.contains("mongodb"));
        assert!(body.get("errors").is_none());
    }
}

#[tokio::test]
async fn test_invalid_input_wins_over_storage_failure() {
    let service = Arc::new(QuoteServiceImpl::new(Arc::new(UnavailableRepository)));
    let app = App::build_router(&AppConfig::default(), service);
    let (status, _) = send(&app, post_quote(&json!({ "name": "A" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let config = AppConfig {
        cors_allowed_origin: Some("https://signs.example.com".to_string()),
        ..AppConfig::default()
    };
    let app = App::build_router(&config, Arc::new(QuoteServiceImpl::in_memory()));

    let req = Request::builder()
        .uri("/api/quotes")
        .header("origin", "https://signs.example.com")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "https://signs.example.com"
    );

    let req = Request::builder()
        .uri("/api/quotes")
        .header("origin", "https://elsewhere.example.com")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_static_assets_served_as_fallback() {
    let dir = std::env::temp_dir().join(format!("quote-static-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Signs</h1>").unwrap();

    let config = AppConfig {
        static_dir: Some(dir.to_string_lossy().into_owned()),
        ..AppConfig::default()
    };
    let app = App::build_router(&config, Arc::new(QuoteServiceImpl::in_memory()));

    let req = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"<h1>Signs</h1>");

    // API routes still win over the fallback
    let (status, _) = send(&app, get_quotes()).await;
    assert_eq!(status, StatusCode::OK);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_bind_falls_back_when_port_taken() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port,
        ..AppConfig::default()
    };
    let app = App::with_service(config, Arc::new(QuoteServiceImpl::in_memory()));
    let listener = app.bind().await.unwrap();
    assert_ne!(listener.local_addr().unwrap().port(), port);
}

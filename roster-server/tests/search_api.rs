// roster-server/tests/search_api.rs
// Router-level tests for /search and /health against the in-memory store

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{TimeZone, Utc};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use roster_server::AppState;
use roster_server::api;
use roster_server::db::{EmployeeStore, MemoryEmployeeStore};
use roster_server::error::{ServiceError, ServiceResult};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::error::{ErrorBody, SEARCH_FAILED_MESSAGE};
use shared::models::{Employee, Role, Status};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

fn employee(id: i32, nombre: &str) -> Employee {
    let ts = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
    Employee {
        id,
        nombre: nombre.to_string(),
        email: format!("{}@empresa.com", nombre.to_lowercase().replace(' ', ".")),
        edad: 28 + id,
        direccion: format!("Calle {id}"),
        password: "hash".to_string(),
        salario: Decimal::new(180_000 + id as i64, 2),
        rol: Role::Worker,
        status: Status::Active,
        user_image: None,
        created_at: ts,
        updated_at: ts,
    }
}

fn app_with(employees: Vec<Employee>) -> Router {
    api::router(AppState::new(MemoryEmployeeStore::new(employees)))
}

fn directory() -> Router {
    app_with(vec![employee(2, "Juan"), employee(1, "Ana Pérez")])
}

/// Store whose every query fails, like an unreachable database
struct BrokenStore;

#[async_trait]
impl EmployeeStore for BrokenStore {
    async fn find_by_name_pattern(&self, _pattern: &str) -> ServiceResult<Vec<Employee>> {
        Err(ServiceError::Db(
            "connection refused: password authentication failed for user app".into(),
        ))
    }
}

fn search_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e["nombre"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_partial_name_match() {
    let (status, body) = send(directory(), search_request(json!({"query": "ana"}).to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Ana Pérez"]);
}

#[tokio::test]
async fn test_empty_query_returns_all_ordered_by_id() {
    let (status, body) = send(directory(), search_request(json!({"query": ""}).to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Ana Pérez", "Juan"]);
}

#[tokio::test]
async fn test_missing_query_and_empty_body_match_all() {
    let (status, body) = send(directory(), search_request("{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(directory(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_falsy_query_matches_all() {
    for body in [r#"{"query":false}"#, r#"{"query":0}"#, r#"{"query":null}"#] {
        let (status, body) = send(directory(), search_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Ana Pérez", "Juan"]);
    }
}

#[tokio::test]
async fn test_no_match_is_empty_list_not_error() {
    let (status, body) = send(directory(), search_request(json!({"query": "zzz"}).to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_only_name_field_is_searched() {
    // "empresa" appears in every email, never in a name
    let (status, body) =
        send(directory(), search_request(json!({"query": "empresa"}).to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_like_metacharacters_match_literally() {
    let app = app_with(vec![employee(1, "Ana"), employee(2, "100% Juan")]);
    let (_, body) = send(app, search_request(json!({"query": "%"}).to_string())).await;
    assert_eq!(names(&body), vec!["100% Juan"]);
}

#[tokio::test]
async fn test_response_uses_stored_field_names() {
    let (_, body) = send(directory(), search_request(json!({"query": "Juan"}).to_string())).await;
    let record = body[0].as_object().unwrap();
    for key in [
        "id",
        "nombre",
        "email",
        "edad",
        "direccion",
        "password",
        "salario",
        "rol",
        "status",
        "user_image",
        "createdAt",
        "updatedAt",
    ] {
        assert!(record.contains_key(key), "missing {key}");
    }
    assert_eq!(record["rol"], "Empleado");
    assert_eq!(record["status"], "Activo");
}

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let app = api::router(AppState::new(BrokenStore));
    let (status, body) = send(app, search_request(json!({"query": "ana"}).to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorBody = serde_json::from_value(body).unwrap();
    assert_eq!(error.error, SEARCH_FAILED_MESSAGE);
    assert!(!error.error.contains("password authentication"));
}

/// Formatted log output collected in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[tokio::test]
async fn test_storage_failure_is_logged_once_with_cause() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = api::router(AppState::new(BrokenStore));
    let (status, _) = send(app, search_request(json!({"query": "ana"}).to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let lines = logs.lines();
    let search_failures: Vec<_> = lines.iter().filter(|l| l.contains("code=8001")).collect();
    assert_eq!(search_failures.len(), 1, "{lines:#?}");
    assert!(search_failures[0].contains("password authentication failed"));
    assert!(!lines.iter().any(|l| l.contains("System error occurred")));
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let (status, body) = send(directory(), search_request("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid search request"));
}

#[tokio::test]
async fn test_cors_and_request_id_headers() {
    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::ORIGIN, "http://localhost:4200")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"query":"ana"}"#))
        .unwrap();
    let response = directory().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(directory(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "roster-server");
}

//! `POST /search` - employee lookup by partial name

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::error::Category;
use shared::SearchRequest;
use shared::error::AppError;
use shared::models::Employee;

use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// Return every employee whose `nombre` contains the query, ordered by id.
///
/// The body is read leniently: an empty body or a missing `query` searches
/// for `""`, which matches everyone. Storage failures are logged and answered
/// with a generic 500.
pub async fn search(State(state): State<AppState>, body: Bytes) -> ApiResult<Vec<Employee>> {
    let SearchRequest { query } = parse_body(&body)?;

    tracing::debug!(query = %query, "Searching employees");

    let employees = state
        .employees
        .find_by_name_pattern(&query)
        .await
        .map_err(|e| e.into_app_error_or(AppError::search_failed()))?;

    tracing::debug!(query = %query, count = employees.len(), "Search complete");
    Ok(Json(employees))
}

fn parse_body(body: &[u8]) -> Result<SearchRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SearchRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        let message = format!("Invalid search request: {e}");
        match e.classify() {
            // Valid JSON, but `query` has an unusable type
            Category::Data => AppError::validation(message),
            _ => AppError::invalid_request(message),
        }
    })
}

use crate::{error::AppError, server::Server};
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct HealthCheckQuery {
    #[serde(default)]
    check: Option<String>,
}

/// Health of the registered components; `?check=<name>` narrows to one
pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}

async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> Result<Json<Value>, AppError> {
    let filter = params.check.as_deref();
    let health_response = server.health_service.check_health(filter).await;

    let response_json = serde_json::to_value(&health_response)
        .map_err(|e| AppError::Internal(format!("Failed to serialize health response: {}", e)))?;

    Ok(Json(response_json))
}

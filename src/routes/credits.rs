use crate::{error::AppError, reporting::CreditsReport, server::Server};
use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use chrono::Local;

pub fn create_credit_routes() -> Router<Server> {
    Router::new().route("/user_credits/{user_id}", get(get_user_credits))
}

/// Credit status of every loan held by a user, as of today
async fn get_user_credits(
    State(server): State<Server>,
    Path(user_id): Path<String>,
) -> Result<Json<CreditsReport>, AppError> {
    let user_id: i32 = user_id
        .parse()
        .map_err(|_| AppError::ParseFailed(format!("Invalid user id '{}'", user_id)))?;

    let today = Local::now().date_naive();
    let report = server.reporting.credit_status(user_id, today).await?;
    Ok(Json(report))
}

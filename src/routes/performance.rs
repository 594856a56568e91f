use crate::{
    error::AppError,
    reporting::{
        MonthPerformance, PlanPerformance,
        performance::{parse_report_date, parse_report_year},
    },
    server::Server,
};
use axum::{
    Form, Router,
    extract::{FromRequest, Multipart, Request, State},
    http::{HeaderValue, header},
    response::Json,
    routing::get,
};
use std::collections::HashMap;

pub fn create_performance_routes() -> Router<Server> {
    Router::new()
        .route(
            "/plans_performance",
            get(require_post).post(plans_performance),
        )
        .route("/year_performance", get(require_post).post(year_performance))
}

async fn require_post() -> AppError {
    AppError::MethodNotAllowed("must use POST".to_string())
}

/// Plan performance for the month of the submitted `DD.MM.YYYY` date
async fn plans_performance(
    State(server): State<Server>,
    request: Request,
) -> Result<Json<Vec<PlanPerformance>>, AppError> {
    let date = parse_report_date(&form_field(request, "date").await?)?;
    let report = server.reporting.monthly_performance(date).await?;
    Ok(Json(report))
}

/// Month-by-month plan performance for the submitted year
async fn year_performance(
    State(server): State<Server>,
    request: Request,
) -> Result<Json<Vec<MonthPerformance>>, AppError> {
    let year = parse_report_year(&form_field(request, "year").await?)?;
    let report = server.reporting.annual_performance(year).await?;
    Ok(Json(report))
}

/// Read one text field from a urlencoded or multipart form.
///
/// A body sent without a content type is read as urlencoded. A missing
/// field reads as empty and fails later, in the value parser.
async fn form_field(mut request: Request, name: &str) -> Result<String, AppError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase);

    match content_type {
        Some(content_type) if content_type.starts_with("multipart/form-data") => {
            multipart_field(request, name).await
        }
        Some(_) => urlencoded_field(request, name).await,
        None => {
            request.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
            urlencoded_field(request, name).await
        }
    }
}

async fn urlencoded_field(request: Request, name: &str) -> Result<String, AppError> {
    let Form(mut fields) = Form::<HashMap<String, String>>::from_request(request, &())
        .await
        .map_err(|rejection| AppError::ParseFailed(rejection.body_text()))?;
    Ok(fields.remove(name).unwrap_or_default())
}

async fn multipart_field(request: Request, name: &str) -> Result<String, AppError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| AppError::ParseFailed(rejection.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ParseFailed(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some(name) {
            return field
                .text()
                .await
                .map_err(|e| AppError::ParseFailed(format!("Failed to read '{}': {}", name, e)));
        }
    }

    Ok(String::new())
}

use crate::{error::AppError, reporting::IngestSummary, server::Server};
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    response::{Html, Json},
    routing::get,
};
use tracing::debug;

const UPLOAD_FIELD: &str = "file";

const UPLOAD_FORM: &str = r#"<!doctype html>
<html>
<head><title>Upload plans</title></head>
<body>
<h1>Upload plans</h1>
<form method="post" action="/upload" enctype="multipart/form-data">
  <input type="file" name="file" accept=".xlsx,.xls,.csv,.tsv,.txt">
  <input type="submit" value="Upload">
</form>
</body>
</html>
"#;

pub fn create_upload_routes(max_file_size: usize) -> Router<Server> {
    Router::new()
        .route("/upload", get(upload_form).post(upload_plans))
        .layer(DefaultBodyLimit::max(max_file_size))
}

async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// Ingest a plan sheet sent as the `file` field of a multipart form
async fn upload_plans(
    State(server): State<Server>,
    mut multipart: Multipart,
) -> Result<Json<IngestSummary>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ParseFailed(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        debug!(file_name = ?field.file_name(), "Receiving plan sheet");
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::ParseFailed(format!("Failed to read upload: {}", e)))?;

        let summary = server.reporting.ingest_plans(&data).await?;
        return Ok(Json(summary));
    }

    Err(AppError::ParseFailed(format!(
        "Missing '{}' field in upload",
        UPLOAD_FIELD
    )))
}

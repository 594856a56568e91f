pub mod credits;
pub mod health;
pub mod performance;
pub mod upload;

use crate::server::Server;
use axum::Router;

pub use health::create_health_routes;

/// Reporting endpoints, mounted at the root
pub fn create_report_routes(max_file_size: usize) -> Router<Server> {
    Router::new()
        .merge(credits::create_credit_routes())
        .merge(upload::create_upload_routes(max_file_size))
        .merge(performance::create_performance_routes())
}

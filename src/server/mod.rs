pub mod config;
pub mod middleware;

use crate::{
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    reporting::ReportingService,
    routes::{create_health_routes, create_report_routes},
    server::middleware::request_response_logger,
    shutdown::shutdown_signal,
};
use axum::{Router, middleware as axum_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub health_service: Arc<HealthService>,
    pub reporting: Arc<ReportingService>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let database_impl = Arc::new(
            DatabaseManagerImpl::new_from_config(&config)
                .await
                .map_err(AppError::Database)?,
        );
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;

        let reporting = Arc::new(ReportingService::new(database.clone()));

        Ok(Self {
            config: Arc::new(config),
            database,
            health_service,
            reporting,
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if self.config.database.migration_on_startup {
            info!("Running database migrations");
            self.database.migrate().await.map_err(AppError::Database)?;
        }

        let app = self.create_app();

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

        info!("Server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

        info!("Server shutdown complete");
        Ok(())
    }

    // Creates an application router
    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            .nest("/health", create_health_routes())
            .merge(create_report_routes(self.config.upload.max_file_size))
            .with_state(self.clone());

        if self.config.logging.log_request {
            app = app.layer(axum_middleware::from_fn(request_response_logger));
        }
        app
    }
}

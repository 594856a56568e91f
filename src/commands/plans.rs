use crate::Config;
use crate::database::{DatabaseManager, DatabaseManagerImpl};
use crate::reporting::ReportingService;
use clap::Subcommand;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Subcommand)]
pub enum PlansAction {
    /// Import a CSV/TSV plan sheet; the whole file is rejected on any invalid row
    Import {
        #[arg(help = "Path to the plan sheet")]
        file: PathBuf,
    },
}

pub async fn handle_plans_command(
    action: PlansAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlansAction::Import { file } => {
            let data = tokio::fs::read(&file).await?;

            let database = Arc::new(DatabaseManagerImpl::new_from_config(config).await?);
            if config.database.migration_on_startup {
                database.migrate().await?;
            }

            info!("Importing plans from {}", file.display());
            let service = ReportingService::new(database);
            let summary = service.ingest_plans(&data).await?;
            println!("{} ({} plans)", summary.message, summary.inserted);
        }
    }

    Ok(())
}

pub mod migrate;
pub mod plans;

use crate::Config;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: migrate::MigrateAction,
    },
    /// Manage monthly plans
    Plans {
        #[command(subcommand)]
        action: plans::PlansAction,
    },
}

pub async fn handle_command(
    command: Commands,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Migrate { action } => migrate::handle_migrate_command(action, config).await,
        Commands::Plans { action } => plans::handle_plans_command(action, config).await,
    }
}

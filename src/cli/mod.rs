// CLI module for operations that run against the database without the HTTP server

pub mod grant_admin;
pub mod migrate;
pub mod seed;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// Lost & Found backend CLI
#[derive(Parser, Debug)]
#[command(name = "lostfound")]
#[command(about = "Lost and found listing service", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Load the demo listings into an empty database
    Seed,

    /// Give an existing account the admin role
    GrantAdmin {
        /// Email of the account to promote
        #[arg(long)]
        email: String,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

/// Execute a CLI command that needs application data
///
/// `Serve` and `Migrate` are handled by main before AppData exists.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    command: Commands,
    app_data: Arc<AppData>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Seed => {
            let inserted = seed::seed_items(&app_data).await?;
            println!("Inserted {} sample items", inserted);
        }
        Commands::GrantAdmin { email } => {
            let user = grant_admin::grant_admin(app_data, &email).await?;
            println!("{} ({}) is now an admin", user.email, user.id);
        }
        other @ (Commands::Serve | Commands::Migrate) => {
            tracing::warn!("{:?} is not handled by execute_command", other);
        }
    }

    Ok(())
}

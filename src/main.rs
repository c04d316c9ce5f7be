use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use lostfound_backend::api::build_routes;
use lostfound_backend::app_data::AppData;
use lostfound_backend::cli::{self, Cli, Commands};
use lostfound_backend::config::{BootstrapSettings, init_database, init_logging, migrate_database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();
    let command = cli.command();
    let settings = BootstrapSettings::from_env()?;

    if command == Commands::Migrate {
        return cli::migrate::run_migrations(&settings).await;
    }

    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, &settings)?);

    match command {
        Commands::Serve => serve(app_data, &settings).await?,
        other => cli::execute_command(other, app_data).await?,
    }

    Ok(())
}

async fn serve(app_data: Arc<AppData>, settings: &BootstrapSettings) -> Result<(), std::io::Error> {
    let app = build_routes(app_data, settings);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at {}/swagger", settings.public_base_url());

    Server::new(TcpListener::bind(address)).run(app).await
}

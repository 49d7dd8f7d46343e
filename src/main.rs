use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;

use lego_catalog::config::DatabaseConfig;
use lego_catalog::db::DatabaseManager;
use lego_catalog::logging;
use lego_catalog::router::app_router;
use lego_catalog::state::AppState;
use lego_catalog::store::{bundled_seed, CatalogStore};

#[derive(Parser)]
#[command(name = "lego-catalog")]
#[command(about = "Server-rendered catalog browser for a Lego set inventory")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the catalog tables if they are missing
    Migrate {
        /// Load the bundled sample data after syncing the schema
        #[arg(long)]
        seed: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let db = DatabaseManager::connect(&config).await?;
    let store = CatalogStore::new(db);

    match cli.command {
        Commands::Serve { port } => {
            let app = app_router(AppState::new(store));

            let bind_addr = format!("0.0.0.0:{port}");
            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            info!("Server is running on http://localhost:{port}");
            axum::serve(listener, app).await?;
        }
        Commands::Migrate { seed } => {
            store.sync_schema().await?;
            info!("Database synchronized");

            if seed {
                let (themes, sets) = bundled_seed()?;
                store.seed(&themes, &sets).await?;
            }
        }
    }

    Ok(())
}

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use penguin_api::artifact;
use penguin_api::config::{Cli, Config};
use penguin_api::model::gbdt::GbdtClassifier;
use penguin_api::model::metadata::load_metadata;
use penguin_api::model::service::PredictionService;
use penguin_api::server::routes::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "penguin_api=debug,tower_http=debug"
    } else {
        "penguin_api=info,tower_http=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(true)
        .init();

    info!("penguin-api v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from the environment.
    let config = Config::from_env();
    let config = Arc::new(config);

    info!(
        model = %config.model_path,
        metadata = %config.metadata_path,
        "Configuration loaded"
    );

    // Materialize artifacts locally. A fetch or load failure aborts startup:
    // the service must never accept traffic without a usable model.
    let model_path = artifact::resolve(&config.model_path).await?;
    let metadata_path = artifact::resolve(&config.metadata_path).await?;

    let model = GbdtClassifier::load(&model_path)?;
    let metadata = load_metadata(&metadata_path)?;

    let service = PredictionService::new(model, metadata);

    // Build application state.
    let state = Arc::new(AppState {
        service,
        config: config.clone(),
    });

    // Build the HTTP router.
    let app = build_router(state);

    // Start the server.
    let listen_addr = cli.listen;
    info!(addr = listen_addr, "Starting server");

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Listening on {listen_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

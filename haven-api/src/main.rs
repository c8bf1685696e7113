use dotenv::dotenv;
use haven_api::config::LogFormat;
use haven_api::server::{self, state::AppState};
use haven_api::{AppConfig, Dependencies, StartupError};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("haven_api=info,haven_ledger=info,haven_repository=info,tower_http=info")
    });

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
                .try_init()?;
        }
    }

    info!(
        service_name = "haven-api",
        service_version = env!("CARGO_PKG_VERSION"),
        ?format,
        "Tracing initialized"
    );
    Ok(())
}

/// Main entry point for the Haven API.
///
/// Loads `.env`, reads the configuration, connects the store and serves the
/// router until interrupted.
///
/// # Returns
///
/// A `Result` indicating success or a `StartupError` if the service could
/// not be configured or wired.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    let dependencies = Dependencies::new(&config).await?;
    let app = server::create_app(AppState::from(dependencies));

    if let Err(err) = server::run_server(app, config.addr()).await {
        error!(error = ?err, "Server error");
        std::process::exit(1);
    }
    Ok(())
}

use clap::Parser;
use common::config::ConfigManager;
use common::{log, log_error, logger};
use snake_score_server::config::{DEFAULT_CONFIG_PATH, ServerConfig};
use snake_score_server::routes::{AppState, router};
use std::net::SocketAddr;
use std::time::Duration;

const RATE_LIMIT_PRUNE_PERIOD: Duration = Duration::from_secs(5 * 60);

#[derive(Parser)]
#[command(name = "snake_score_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, ServerConfig> = ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_config().inspect_err(|e| {
        log_error!("Failed to load {}: {}", args.config, e);
    })?;
    let addr = config.socket_addr()?;

    let state = AppState::new(config);
    tokio::spawn(state.limiter.clone().run_pruning(RATE_LIMIT_PRUNE_PERIOD));

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!("Snake score server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log!("Server shut down gracefully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}

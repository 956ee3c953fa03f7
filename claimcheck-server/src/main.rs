use clap::Parser;
use claimcheck_core::{ClaimCheckConfig, FactChecker};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use claimcheck_server::server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "claimcheck.toml")]
    config: String,

    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config
    let config = match ClaimCheckConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Init logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level));
    fmt().with_env_filter(filter).init();

    // Reference data
    let guidelines = match config.reference.guideline_catalog() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Failed to load guideline catalog: {}", e);
            std::process::exit(1);
        }
    };
    let criteria = match config.reference.criteria_catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load criteria catalog: {}", e);
            std::process::exit(1);
        }
    };

    if args.health {
        println!("✅ Guideline catalog: {} entries", guidelines.len());
        println!("✅ Criteria catalog: {} codes", criteria.len());
        println!("✅ ClaimCheck health check passed");
        return Ok(());
    }

    tracing::info!(
        guidelines = guidelines.len(),
        criteria = criteria.len(),
        "Reference data loaded"
    );
    let checker = FactChecker::new(guidelines, criteria);

    // IPC Server
    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    // HTTP REST API server if enabled
    if config.http.enabled {
        let http_checker = checker.clone();
        let http_config = config.clone();
        let http_shutdown = tx.subscribe();
        tokio::spawn(async move {
            if let Err(e) = claimcheck_server::http::start_http_server(
                http_checker,
                http_config,
                http_shutdown,
            )
            .await
            {
                tracing::error!("HTTP server error: {}", e);
            }
        });
    }

    let socket_path = config.service.socket_path.clone();
    server::run_unix_server(&socket_path, checker, tx.subscribe()).await?;

    Ok(())
}

//! DGX Inference Gateway - forwards generation requests to a local inference backend.

use std::env;
use std::sync::Arc;

use tokio::net::TcpListener;

use dgx_gateway::{build_router, logging, AppState, Config, OllamaBackend};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("dgx-gateway {}", VERSION);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml or the GATEWAY__SECTION__KEY environment variables.",
            e
        )
    })?;

    logging::init(&config.logging.level);

    let backend = OllamaBackend::new(&config.backend)?;
    tracing::info!(
        "Starting DGX inference gateway {}: backend={} timeout={}s credential={}",
        VERSION,
        config.backend.base_url,
        config.backend.timeout_seconds,
        if config.backend.bearer_token().is_some() { "set" } else { "none" }
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, Arc::new(backend)));
    let app = build_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

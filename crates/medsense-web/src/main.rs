//! MedSense Web Server
//!
//! Run with: cargo run -p medsense-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use medsense_web::config::Config;
use medsense_web::router::build_router;
use medsense_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("medsense=debug,info")),
        )
        .init();

    info!("Starting MedSense Web Server...");

    let mut config = Config::load()?;
    if let Ok(bind) = std::env::var("MEDSENSE_BIND") {
        config.server.bind = bind;
    }
    let bind = config.server.bind.clone();

    // Database, seed data and classifier are all blocking work
    let state = tokio::task::spawn_blocking(move || AppState::build(config)).await??;
    if !state.model.is_ready() {
        info!("⚠️  Prediction disabled until a valid model artifact is installed");
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("🚀 Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

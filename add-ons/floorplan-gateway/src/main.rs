//! Gateway entry point. The credential is validated before anything listens:
//! a missing `GEMINI_API_KEY` is a startup failure, not a per-request 500.

use floorplan_core::{GatewayConfig, GeminiGateway, RenderPipeline};
use floorplan_gateway::{build_app, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // .env is optional; system environment wins when absent.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[floorplan-gateway] .env not loaded: {e} (using system environment)");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[floorplan-gateway] startup failed: {e}");
            std::process::exit(1);
        }
    };

    let gateway = match GeminiGateway::new(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("[floorplan-gateway] startup failed: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState {
        pipeline: RenderPipeline::new(Arc::new(gateway)),
    };
    let app = build_app(state, &config.allowed_origins);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!(
                "[floorplan-gateway] cannot bind {}: {e}",
                config.bind_addr
            );
            std::process::exit(1);
        }
    };
    tracing::info!(addr = %config.bind_addr, "floorplan-gateway listening");

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("server error: {e}");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested (Ctrl+C)");
        }
    }
}

//! # PabloBot HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module runs the chat service behind `pablobot srv`:
//! - Port availability checking with automatic fallback
//! - Routing for the page, the chat endpoint and static assets
//! - Optional permissive CORS and request tracing
//! - Graceful shutdown on Ctrl+C / SIGTERM
//!
//! ## Architecture
//!
//! 1. Find an available port if the requested one is in use
//! 2. Build the Axum router around an `AppState` holding the responder
//! 3. Print the URLs and serve until a shutdown signal arrives
//!
use super::config::ServerConfig;
use super::handlers::{self, AppState};
use crate::core::error::{PabloError, Result};
use anyhow::{anyhow, Context};
use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

/// Consecutive ports tried before giving up.
const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port starting at `config.port`, prints the service
/// URLs and serves `create_app` until Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// - No free port within `MAX_PORT_ATTEMPTS`.
/// - Binding the listener fails (e.g., permissions).
/// - The Axum server encounters a fatal error.
pub async fn run_server(config: ServerConfig, state: AppState) -> Result<()> {
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let bot_name = state.responder.bot_name().to_string();
    let app = create_app(&config, state);

    println!("\n=================================================================");
    println!("🤖 {} is listening", bot_name);
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    println!("⚙️  Binding to address: {}", addr);
    println!("💬 Chat endpoint:     POST /chat");
    match &config.static_dir {
        Some(dir) => println!("📂 Static files from: {}", dir.display()),
        None => println!("📂 Static files:      embedded"),
    }
    println!("🔒 CORS enabled:      {}", config.enable_cors);
    println!("🎲 Fallback replies:  {:?}", config.fallback);
    println!("=================================================================\n");

    info!("Starting chat service on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and the following ports, up to `max_attempts` in
/// total, and returns the first address that can be bound.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);

        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(port) => port,
                    None => break,
                };
            }
        }
    }

    Err(anyhow!(PabloError::Server(format!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host, start_port, max_attempts
    ))))
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router: page, chat endpoint, health check and static assets,
/// wrapped in tracing and (optionally permissive) CORS layers.
fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let static_routes: Router<AppState> = match &config.static_dir {
        Some(dir) => {
            if !dir.join("script.js").is_file() {
                warn!(
                    "Static directory {} has no script.js; serving the built-in page script.",
                    dir.display()
                );
            }
            let fallback: MethodRouter = get(handlers::static_fallback);
            Router::new().nest_service("/static", ServeDir::new(dir).fallback(fallback))
        }
        None => Router::new().route("/static/script.js", get(handlers::script)),
    };

    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .merge(static_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
        .with_state(state)
}

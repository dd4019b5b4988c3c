pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use anyhow::Context;
use axum::http::{header, Method};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = shared::config::load_config()?;
    system::tracing::initialize(&config.logging)?;
    match &config.source {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("Using default embedded configuration"),
    }

    let db_path = shared::config::get_database_path(&config)?;
    let db = shared::data::db::initialize_database(&db_path)
        .await
        .context("db init failed")?;

    // Ensure admin employee exists
    system::initialization::ensure_admin_exists(&db, &config.auth.bootstrap_admin_password)
        .await?;

    let jwt_secret = if config.auth.jwt_secret.is_empty() {
        tracing::warn!("auth.jwt_secret is empty, tokens will not survive a restart");
        system::auth::jwt::generate_secret()
    } else {
        config.auth.jwt_secret.clone()
    };

    let state = routes::AppState {
        db,
        jwt_secret,
        token_ttl_hours: config.auth.token_ttl_hours,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::HeaderName::from_static(system::auth::middleware::TOKEN_HEADER),
        ]);

    let app = routes::configure_routes(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            // Propagate the error to stop the application
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}

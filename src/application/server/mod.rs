pub mod routes;
pub mod state;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info};

use crate::models::config::AppConfig;
use crate::providers::github::GithubClient;
use crate::services::lookup::LookupService;

pub use state::AppState;

/// Builds the shared handler state from a validated config.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let token = config.token().context("GitHub Token is missing")?;
    let github = GithubClient::new(
        token,
        &config.github.api_url,
        Duration::from_secs(config.github.timeout_secs),
    )?;
    debug!(base_url = github.base_url(), "GitHub client ready");

    Ok(AppState {
        lookup: LookupService::new(github, config.github.commit_limit),
        status_policy: config.server.status_policy,
    })
}

/// Response headers applied to every reply.
pub fn security_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "no-referrer"))
}

pub async fn run(config: AppConfig) -> Result<()> {
    let state = web::Data::new(build_state(&config)?);
    let server_addr = format!("{}:{}", config.server.host, config.server.port);

    info!(
        api_url = %config.github.api_url,
        status_policy = ?config.server.status_policy,
        "Starting server"
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(security_headers())
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
            .default_service(routes::default_service())
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?;

    info!("Backend running on http://{}", server_addr);

    server.run().await.context("Server terminated unexpectedly")
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use messages_api::api::router;
use messages_api::auth::{JwksManager, TokenValidator};
use messages_api::config::Config;
use messages_api::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // Missing domain/audience is fatal: exit before serving traffic.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let jwks = JwksManager::new(config.jwks_url());
    let validator = TokenValidator::new(jwks, config.issuer(), config.audience.clone());
    let state = AppState::new(validator);
    let app = router(state);

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(_) => {
            error!(host = %config.host, port = config.port, "invalid bind address");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%err, %addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, issuer = %config.issuer(), "messages API listening (docs at /docs)");

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(%err, "server error");
        return ExitCode::FAILURE;
    }

    info!("server exited");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

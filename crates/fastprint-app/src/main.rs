// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// FastPrint — engineering-drawing lookup and batch printing service
//
// Entry point. Initialises logging, loads configuration, wires the backend
// services and serves the JSON API until Ctrl-C.

mod http;
mod routes;
mod server;
mod services;

use std::path::PathBuf;

use fastprint_core::AppConfig;

use server::HttpServer;
use services::app_services::AppServices;

const CONFIG_ENV: &str = "FASTPRINT_CONFIG";
const LISTEN_ENV: &str = "FASTPRINT_LISTEN";
const DEFAULT_CONFIG_FILE: &str = "fastprint.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("FastPrint starting");

    let config = load_config();
    let listen_addr = config.listen_addr.clone();

    let mut server = HttpServer::new(AppServices::init(config));
    if let Err(e) = server.start(&listen_addr).await {
        tracing::error!(error = %e, "could not start HTTP server");
        std::process::exit(1);
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for Ctrl-C");
    }

    if let Err(e) = server.stop().await {
        tracing::error!(error = %e, "unclean shutdown");
    }
    tracing::info!("FastPrint stopped");
}

/// Configuration from `$FASTPRINT_CONFIG` (or `./fastprint.json`), with the
/// listen address overridable through `$FASTPRINT_LISTEN`.
fn load_config() -> AppConfig {
    let path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut config = AppConfig::load_or_default(&path);
    if let Ok(addr) = std::env::var(LISTEN_ENV) {
        config.listen_addr = addr;
    }
    config
}

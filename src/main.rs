use std::{process::ExitCode, sync::Arc};

use coffee_snob::{
    cafe::directory::CafeDirectory,
    config::{Config, DEFAULT_CONFIG_PATH},
    server::server::Server,
    timing::clock::SystemClock,
};
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let loaded = match Config::load(&config_path) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Could not load config '{}'.\n{}", config_path, err);
            return ExitCode::FAILURE;
        }
    };
    let defaulted = loaded.is_none();
    let config = loaded.unwrap_or_default();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(config.log_level))
        .init();
    if defaulted {
        warn!(path = %config_path, "Config file not found, using defaults");
    }

    let directory = match CafeDirectory::load(&config.data_path) {
        Ok(directory) => Arc::new(directory),
        Err(err) => {
            error!(path = %config.data_path, %err, "Could not load cafes");
            return ExitCode::FAILURE;
        }
    };
    let server = Server::setup(directory, Arc::new(SystemClock));

    let listener = match TcpListener::bind(&config.address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(address = %config.address, %err, "Could not bind");
            return ExitCode::FAILURE;
        }
    };
    info!(address = %config.address, "Listening");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(connection) => connection,
            Err(err) => {
                error!(%err, "Could not accept connection");
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let server_clone = server.clone();
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, server_clone)
                .await
            {
                error!(%peer, %err, "Connection failed");
            }
        });
    }
}

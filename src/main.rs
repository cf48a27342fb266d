//! filewm - Entry Point
//!
//! A password-gated HTTP file manager confined to one directory.

use log::{error, info};
use std::process::ExitCode;

use filewm::Server;
use filewm::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Launching file manager...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.start().await {
        error!("Server terminated: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

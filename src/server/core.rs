use axum::Router;
use log::{error, info};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::FileManagerError;
use crate::protocol::create_router;
use crate::server::state::AppState;
use crate::storage::SandboxRoot;

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Creates the sandbox root if needed and binds the listener.
    pub async fn new(config: ServerConfig) -> Result<Self, FileManagerError> {
        let root = SandboxRoot::open(config.server_root_path()).inspect_err(|e| {
            error!(
                "Failed to prepare server root {}: {}",
                config.server_root, e
            )
        })?;
        info!("Server root directory: {}", root.path().display());

        let socket = config.listen_socket();
        let listener = TcpListener::bind(&socket)
            .await
            .inspect_err(|e| error!("Failed to bind to {}: {}", socket, e))?;
        info!("Server bound to {}", socket);

        let initial_password = config.initial_password.clone();
        let state = AppState::new(root, config);
        if let Some(password) = initial_password {
            state.gate.configure(password, true).await;
            info!("Password protection enabled at startup");
        }

        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Serves requests until Ctrl-C, then drains in-flight ones.
    pub async fn start(self) -> Result<(), FileManagerError> {
        let router = self.router();
        info!(
            "Serving {} on http://{} ({} listing)",
            self.state.root.path().display(),
            self.local_addr()?,
            self.state.config.listing_mode.as_str()
        );

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

//! Alert Relay - uptime monitor webhook to ServerChan push relay
//!
//! Accepts authenticated monitor status webhooks, composes a push
//! notification and forwards it to the ServerChan API.

pub mod alert;
pub mod compose;
pub mod config;
pub mod error;
pub mod io;
pub mod notifier;
pub mod serverchan;
pub mod validator;
pub mod webhook;

pub use config::{load_config, Config};
pub use error::{RelayError, Result};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::serverchan::ServerChanNotifier;
use crate::webhook::AppState;

/// Assembles a [`Relay`] from configuration, with optional injected collaborators
pub struct RelayBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    notifier: Option<Arc<dyn Notifier>>,
    bind_addr: Option<SocketAddr>,
}

impl RelayBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            notifier: None,
            bind_addr: None,
        }
    }

    /// Use this HTTP client for the downstream call instead of reqwest
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Replace the ServerChan notifier entirely
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Listen on this address instead of the configured port
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    pub async fn build(self) -> Result<Relay> {
        let time_zone = self.config.server.time_location();

        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => {
                let http: Arc<dyn HttpClient> = match self.http {
                    Some(http) => http,
                    None => Arc::new(ReqwestHttpClient::with_timeout(Duration::from_secs(
                        self.config.server_chan.timeout_seconds,
                    ))?),
                };
                Arc::new(ServerChanNotifier::new(&self.config.server_chan, http))
            }
        };

        let addr = match self.bind_addr {
            Some(addr) => addr,
            None => self.config.server.bind_addr()?,
        };
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!(
            "Relay listening on {}, time zone {}",
            local_addr,
            time_zone.name()
        );

        let state = AppState::new(&self.config.server.auth_token, time_zone, notifier);
        Ok(Relay {
            listener,
            local_addr,
            state,
        })
    }
}

/// A bound relay server, ready to serve
pub struct Relay {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: AppState,
}

impl Relay {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until ctrl-c
    pub async fn start(self) -> Result<()> {
        let cancel = CancellationToken::new();
        let cancel_for_signal = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                return;
            }
            tracing::info!("Shutdown signal received");
            cancel_for_signal.cancel();
        });

        self.start_with_shutdown(cancel).await
    }

    /// Serve until `cancel` fires
    pub async fn start_with_shutdown(self, cancel: CancellationToken) -> Result<()> {
        let router = webhook::build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await?;

        tracing::info!("Relay stopped");
        Ok(())
    }
}

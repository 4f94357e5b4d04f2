//! ServerChan push client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ServerChanConfig;
use crate::io::HttpClient;
use crate::notifier::{Notification, Notifier};

/// Reply envelope returned by the ServerChan `.send` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerChanResponse {
    pub code: i64,
    pub message: String,
    pub data: ServerChanData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerChanData {
    pub pushid: String,
    pub readkey: String,
    pub error: String,
    pub errorcode: i64,
}

/// ServerChan notification sender
pub struct ServerChanNotifier {
    api_key: String,
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ServerChanNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerChanNotifier")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ServerChanNotifier {
    pub fn new(config: &ServerChanConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created ServerChanNotifier for {}", config.base_url);

        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// `{base}/{apikey}.send`
    pub fn send_url(&self) -> String {
        format!("{}/{}.send", self.base_url, self.api_key)
    }
}

#[async_trait]
impl Notifier for ServerChanNotifier {
    fn type_name(&self) -> &str {
        "serverchan"
    }

    async fn notify(&self, notification: &Notification) -> crate::Result<()> {
        let payload = serde_json::to_string(notification)?;
        let url = self.send_url();

        tracing::debug!("Sending to ServerChan: {}", payload);
        tracing::debug!("ServerChan URL: {}", url);

        let response = self.http.post_json(&url, &payload).await?;

        tracing::info!("ServerChan response status: {}", response.status);
        tracing::info!("ServerChan response body: {}", response.body);

        match serde_json::from_str::<ServerChanResponse>(&response.body) {
            Ok(reply) if reply.code == 0 => {
                tracing::info!("ServerChan push successful, pushid {}", reply.data.pushid);
            }
            Ok(reply) => {
                tracing::warn!(
                    "ServerChan push failed: code {}, message '{}', error '{}'",
                    reply.code,
                    reply.message,
                    reply.data.error
                );
            }
            Err(e) => {
                tracing::warn!("Failed to parse ServerChan response: {}", e);
            }
        }

        if response.status != 200 {
            return Err(crate::RelayError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}

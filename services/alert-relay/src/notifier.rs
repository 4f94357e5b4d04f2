//! Notifier trait for pushing composed alerts

use async_trait::async_trait;
use serde::Serialize;

/// A push notification ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    #[serde(rename = "desp")]
    pub body: String,
}

/// Trait for sending notifications
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "serverchan")
    fn type_name(&self) -> &str;

    /// Send a notification
    async fn notify(&self, notification: &Notification) -> crate::Result<()>;
}

//! Inbound alert payload and status mapping

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Status value that marks a monitor as down
pub const OFFLINE_STATUS: &str = "offline";

/// Alert payload posted by the uptime monitor
///
/// An explicit `null` decodes like an absent key, so optional fields stay
/// optional and nulled required fields surface as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertRecord {
    #[serde(rename = "monitor_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "monitor_name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "monitor_target", deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(rename = "monitor_type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(rename = "monitor_category", deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "monitor_status", deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
    /// Location label to error message, kept sorted so the rendered list is stable
    #[serde(rename = "monitor_errors", deserialize_with = "null_as_default")]
    pub errors: BTreeMap<String, String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AlertRecord {
    /// Check the fields the relay cannot work without
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.is_empty()
            || self.target.is_empty()
            || self.status.is_empty()
            || self.timestamp == 0
        {
            return Err(crate::RelayError::MissingFields);
        }
        Ok(())
    }

    pub fn alert_status(&self) -> AlertStatus {
        AlertStatus::from_status(&self.status)
    }
}

/// Two-way status mapping: `offline` or anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Offline,
    Recovered,
}

impl AlertStatus {
    pub fn from_status(status: &str) -> Self {
        if status == OFFLINE_STATUS {
            AlertStatus::Offline
        } else {
            AlertStatus::Recovered
        }
    }

    /// Label text shown in the push title and body
    pub fn label(&self) -> &'static str {
        match self {
            AlertStatus::Offline => "离线",
            AlertStatus::Recovered => "恢复",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

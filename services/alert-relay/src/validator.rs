//! Inbound request checks: method, bearer token, payload shape

use axum::http::{header, HeaderMap, Method};

use crate::alert::AlertRecord;
use crate::RelayError;

/// Only POST carries alerts
pub fn check_method(method: &Method) -> crate::Result<()> {
    if *method != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }
    Ok(())
}

/// Compare the `Authorization` header against `Bearer <token>`
///
/// Plain equality, matching what existing monitor deployments send.
pub fn authorize(headers: &HeaderMap, token: &str) -> crate::Result<()> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(RelayError::MissingCredential),
    };

    let expected = format!("Bearer {}", token);
    if value.as_bytes() != expected.as_bytes() {
        return Err(RelayError::InvalidCredential);
    }
    Ok(())
}

/// Decode and validate an alert body
///
/// Invalid UTF-8 is replaced with U+FFFD before decoding rather than rejected.
pub fn parse_alert(body: &[u8]) -> crate::Result<AlertRecord> {
    let text = String::from_utf8_lossy(body);
    tracing::info!("Received webhook data: {}", text);

    let record: AlertRecord = serde_json::from_str(&text).map_err(RelayError::InvalidFormat)?;
    record.validate()?;

    tracing::info!(
        "Parsed monitor data: name={}, target={}, status={}, type={}",
        record.name,
        record.target,
        record.status,
        record.kind
    );
    Ok(record)
}

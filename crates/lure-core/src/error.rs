// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lure engagement engine.

use thiserror::Error;

/// The primary error type used across all Lure crates and collaborator traits.
#[derive(Debug, Error)]
pub enum LureError {
    /// Configuration errors (invalid thresholds, malformed pattern data).
    #[error("configuration error: {0}")]
    Config(String),

    /// A read-only operation referenced a session that does not exist.
    ///
    /// Message processing creates sessions on first use; this variant is
    /// only produced by status/report queries.
    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Response generation failed (rule engine or model backend unreachable).
    #[error("responder error: {message}")]
    Responder {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Final report delivery failed (callback endpoint unreachable).
    #[error("report delivery error: {message}")]
    ReportDelivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_session_id() {
        let e = LureError::SessionNotFound {
            session_id: "wa-42".into(),
        };
        assert_eq!(e.to_string(), "session not found: wa-42");
    }

    #[test]
    fn all_variants_construct() {
        let _config = LureError::Config("bad threshold".into());
        let _responder = LureError::Responder {
            message: "backend down".into(),
            source: None,
        };
        let _delivery = LureError::ReportDelivery {
            message: "endpoint 503".into(),
            source: Some(Box::new(std::io::Error::other("connect refused"))),
        };
        let _internal = LureError::Internal("unexpected".into());
    }
}

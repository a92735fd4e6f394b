// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response generation seam.

use async_trait::async_trait;

use crate::error::LureError;
use crate::types::{DetectionResult, EngagementState, Message};

/// Produces the next outbound message text for an engagement.
///
/// Implementations may be template-based or model-backed. The engine does
/// not inspect or validate the returned text; a failed call makes the
/// engine fall back to a fixed neutral reply rather than fail the message.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Generate the agent's reply given the current engagement state, the
    /// recent conversation, and the detection outcome for the latest
    /// inbound message.
    async fn respond(
        &self,
        state: EngagementState,
        history: &[Message],
        detection: &DetectionResult,
    ) -> Result<String, LureError>;
}

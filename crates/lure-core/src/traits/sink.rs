// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Final report delivery seam.

use async_trait::async_trait;

use crate::error::LureError;
use crate::report::FinalReport;

/// Delivers a consolidated engagement report to the external evaluator.
///
/// Delivery success/failure is the sink's concern; the engine logs a
/// failure and moves on without retrying.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, report: &FinalReport) -> Result<(), LureError>;
}

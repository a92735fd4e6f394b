// SPDX-FileCopyrightText: 2026 Lure Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle for the Lure engagement engine: accumulated
//! intelligence, the six-state engagement machine, and the concurrent
//! session store.

pub mod intelligence;
pub mod session;
pub mod state;

pub use intelligence::SessionIntelligence;
pub use session::{Session, SessionStore, SessionView};
pub use state::{StateMachine, StateThresholds};

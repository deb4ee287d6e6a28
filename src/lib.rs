//! Persistent shell bridge to a command-line version-control engine.
//!
//! One long-lived shell process is kept per workspace and queried for pending
//! changes, which are classified for presentation in an editor.
//!
//! - `areas`: Stateful components (shell channel, workspace handle, orchestrator, configuration)
//! - `artifacts`: Protocol framing, workspace identity and change classification
//! - `commands`: Engine commands issued over a shell
//! - `errors`: Error taxonomy

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

//! Core runtime components
//!
//! - `channel`: One persistent shell process and its request/response exchange
//! - `workspace`: A tracked workspace serializing commands onto its own shell
//! - `orchestrator`: Workspace discovery and the registry of tracked workspaces
//! - `configuration`: Typed settings lookup and change notifications

pub mod channel;
pub mod configuration;
pub mod orchestrator;
pub mod workspace;

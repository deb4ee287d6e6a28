//! Porcelain commands (workspace-level queries)
//!
//! ## Commands
//!
//! - `status`: List pending changes and classify them for presentation

pub mod status;

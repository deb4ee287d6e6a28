//! Data structures and pure algorithms
//!
//! - `shell`: Request framing, response terminators and launch options
//! - `status`: Change kinds, change records and their classification
//! - `workspace`: Workspace identity as resolved by the shell

pub mod shell;
pub mod status;
pub mod workspace;

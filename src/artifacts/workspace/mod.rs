//! Workspace identity as resolved by the shell

pub mod workspace_info;

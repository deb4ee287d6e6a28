//! Plumbing commands (low-level engine queries)
//!
//! ## Commands
//!
//! - `getworkspacefrompath`: Resolve a folder to the workspace that contains it

pub mod get_workspace_from_path;

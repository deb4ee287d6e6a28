//! Shell command implementations
//!
//! Commands are grouped the way the version-control engine groups them:
//!
//! - `plumbing`: Low-level queries used for discovery (workspace from path)
//! - `porcelain`: User-facing queries over a tracked workspace (pending changes)
//!
//! Each command is a method on the component it runs against: plumbing on a
//! bare `ProcessChannel`, porcelain on a `WorkspaceHandle`.

pub mod plumbing;
pub mod porcelain;

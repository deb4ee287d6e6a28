//! Error taxonomy
//!
//! - `ChannelError`: failures of a single request/response exchange with a shell
//! - `DiscoveryError`: per-folder, non-fatal outcomes of workspace discovery
//! - `BootstrapFailure`: the discovery shell could not be started

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("shell is not running")]
    NotRunning,
    #[error("shell did not answer within {0:?}")]
    Timeout(std::time::Duration),
    #[error("shell process exited while a command was pending")]
    ProcessExited,
    #[error("malformed shell response: {0}")]
    MalformedResponse(String),
    #[error("invalid shell request: {0}")]
    InvalidRequest(String),
    #[error("another command is already in flight on this shell")]
    Busy,
    #[error("command failed with exit code {exit_code}")]
    CommandFailed { exit_code: i32, output: Vec<String> },
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no workspace found at {0:?}")]
    NotFound(PathBuf),
    #[error("{folder:?} belongs to workspace {id} which is already tracked")]
    Duplicate { folder: PathBuf, id: String },
    #[error("unable to resolve workspace at {folder:?}: {source}")]
    Resolve {
        folder: PathBuf,
        #[source]
        source: ChannelError,
    },
    #[error("unable to start shell for workspace {0:?}")]
    ChannelStart(PathBuf),
}

#[derive(Debug, Clone, Error)]
#[error("unable to start the discovery shell `{executable}`")]
pub struct BootstrapFailure {
    pub executable: String,
}

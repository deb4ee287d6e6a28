use crate::areas::channel::ProcessChannel;
use crate::artifacts::shell::protocol::CommandResponse;
use crate::artifacts::workspace::workspace_info::WorkspaceIdentity;
use crate::errors::ChannelError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// One tracked workspace bound to its own shell.
///
/// Commands queue on a fair lock, so concurrent callers reach the shell one at
/// a time in arrival order.
#[derive(Debug)]
pub struct WorkspaceHandle {
    folder: PathBuf,
    identity: WorkspaceIdentity,
    channel: ProcessChannel,
    queue: Mutex<()>,
    disposed: AtomicBool,
}

impl WorkspaceHandle {
    pub fn new(folder: PathBuf, identity: WorkspaceIdentity, channel: ProcessChannel) -> Self {
        WorkspaceHandle {
            folder,
            identity,
            channel,
            queue: Mutex::new(()),
            disposed: AtomicBool::new(false),
        }
    }

    /// The root folder this workspace was discovered from
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn identity(&self) -> &WorkspaceIdentity {
        &self.identity
    }

    pub fn channel(&self) -> &ProcessChannel {
        &self.channel
    }

    /// False once disposed or after its shell died
    pub fn is_usable(&self) -> bool {
        !self.disposed.load(Ordering::SeqCst) && self.channel.is_running()
    }

    pub async fn run(&self, command: &str) -> Result<CommandResponse, ChannelError> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(ChannelError::NotRunning);
        }

        let _turn = self.queue.lock().await;
        if self.disposed.load(Ordering::SeqCst) {
            return Err(ChannelError::NotRunning);
        }

        self.channel.execute(command).await
    }

    pub async fn stop(&self) {
        self.channel.stop().await;
    }

    /// Stops and releases the shell. Queued commands fail with `NotRunning`.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.channel.stop().await;
        self.channel.dispose();
        tracing::debug!("disposed workspace {}", self.identity);
    }
}

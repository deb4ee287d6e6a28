use crate::areas::channel::ProcessChannel;
use crate::areas::workspace::WorkspaceHandle;
use crate::artifacts::shell::options::ShellOptions;
use crate::artifacts::workspace::workspace_info::WorkspaceId;
use crate::errors::{BootstrapFailure, DiscoveryError};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError};
use tokio::sync::Mutex;

/// The editor surface used to tell the user about failures
pub trait UserNotifier: Send + Sync {
    fn show_error(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn show_error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Idle,
    Discovering,
    Ready,
    Failed,
}

/// Discovers the workspaces under a set of root folders and keeps exactly one
/// shell per distinct workspace.
pub struct WorkspaceOrchestrator {
    options: ShellOptions,
    bootstrap_dir: PathBuf,
    notifier: Arc<dyn UserNotifier>,
    state: std::sync::Mutex<OrchestratorState>,
    // registration order; first registration of an id wins
    registry: Mutex<Vec<Arc<WorkspaceHandle>>>,
}

impl WorkspaceOrchestrator {
    pub fn new(options: ShellOptions) -> Self {
        WorkspaceOrchestrator {
            options,
            bootstrap_dir: std::env::temp_dir(),
            notifier: Arc::new(LogNotifier),
            state: std::sync::Mutex::new(OrchestratorState::Idle),
            registry: Mutex::new(Vec::new()),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn UserNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Directory the discovery shell runs in; never one of the workspaces
    pub fn with_bootstrap_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bootstrap_dir = dir.into();
        self
    }

    pub fn state(&self) -> OrchestratorState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: OrchestratorState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Tracked workspaces in registration order
    pub async fn workspaces(&self) -> Vec<Arc<WorkspaceHandle>> {
        self.registry.lock().await.clone()
    }

    pub async fn workspace(&self, id: &WorkspaceId) -> Option<Arc<WorkspaceHandle>> {
        self.registry
            .lock()
            .await
            .iter()
            .find(|handle| handle.identity().id() == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.registry.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Resolves every root folder and starts a shell per new workspace.
    ///
    /// Never fails: a folder that cannot be tracked is logged and skipped, and
    /// the per-folder diagnostics are returned. Only a discovery shell that
    /// cannot start is reported to the user, leaving the orchestrator `Failed`.
    pub async fn initialize(&self, folders: &[PathBuf]) -> Vec<DiscoveryError> {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state != OrchestratorState::Idle {
                tracing::warn!("workspaces already initialized ({:?})", *state);
                return Vec::new();
            }
            *state = OrchestratorState::Discovering;
        }

        if folders.is_empty() {
            self.set_state(OrchestratorState::Ready);
            return Vec::new();
        }

        let bootstrap = ProcessChannel::new(&self.bootstrap_dir, self.options.clone());
        if !bootstrap.start().await {
            bootstrap.dispose();
            let failure = BootstrapFailure {
                executable: self.options.display_executable(),
            };
            self.notifier.show_error(&failure.to_string());
            self.set_state(OrchestratorState::Failed);
            return Vec::new();
        }

        let diagnostics = self.discover(&bootstrap, folders).await;

        bootstrap.stop().await;
        bootstrap.dispose();

        self.set_state(OrchestratorState::Ready);
        tracing::info!(
            "tracking {} workspace(s) from {} folder(s)",
            self.len().await,
            folders.len()
        );

        diagnostics
    }

    async fn discover(&self, bootstrap: &ProcessChannel, folders: &[PathBuf]) -> Vec<DiscoveryError> {
        let mut diagnostics = Vec::new();

        for folder in folders {
            let Err(error) = self.discover_folder(bootstrap, folder).await else {
                continue;
            };

            match &error {
                DiscoveryError::NotFound(_) | DiscoveryError::Duplicate { .. } => {
                    tracing::debug!("{error}")
                }
                DiscoveryError::Resolve { .. } => {
                    tracing::warn!("{error}");
                    self.notifier.show_error(&error.to_string());
                }
                DiscoveryError::ChannelStart(_) => tracing::warn!("{error}"),
            }
            diagnostics.push(error);
        }

        diagnostics
    }

    async fn discover_folder(
        &self,
        bootstrap: &ProcessChannel,
        folder: &Path,
    ) -> Result<(), DiscoveryError> {
        let identity = bootstrap
            .get_workspace_from_path(folder)
            .await
            .map_err(|source| DiscoveryError::Resolve {
                folder: folder.to_path_buf(),
                source,
            })?
            .ok_or_else(|| DiscoveryError::NotFound(folder.to_path_buf()))?;

        let duplicate = || DiscoveryError::Duplicate {
            folder: folder.to_path_buf(),
            id: identity.id().to_string(),
        };

        if self.workspace(identity.id()).await.is_some() {
            return Err(duplicate());
        }

        let channel = ProcessChannel::new(identity.root(), self.options.clone());
        if !channel.start().await {
            channel.dispose();
            return Err(DiscoveryError::ChannelStart(identity.root().to_path_buf()));
        }

        let mut registry = self.registry.lock().await;
        if registry
            .iter()
            .any(|handle| handle.identity().id() == identity.id())
        {
            drop(registry);
            let error = duplicate();
            WorkspaceHandle::new(folder.to_path_buf(), identity, channel)
                .dispose()
                .await;
            return Err(error);
        }

        tracing::info!("tracking workspace {identity}");
        registry.push(Arc::new(WorkspaceHandle::new(
            folder.to_path_buf(),
            identity,
            channel,
        )));

        Ok(())
    }

    /// Stops every tracked shell concurrently and waits for all of them
    pub async fn shutdown_all(&self) {
        let handles = self.workspaces().await;

        join_all(handles.iter().map(|handle| handle.stop())).await;
    }

    /// Releases every tracked workspace and empties the registry
    pub async fn dispose(&self) {
        let handles = std::mem::take(&mut *self.registry.lock().await);

        join_all(handles.iter().map(|handle| handle.dispose())).await;
    }

    /// Explicit recovery: drops every workspace and runs discovery again
    pub async fn reinitialize(&self, folders: &[PathBuf]) -> Vec<DiscoveryError> {
        self.dispose().await;
        self.set_state(OrchestratorState::Idle);

        self.initialize(folders).await
    }
}

mod bootstrap_shell_is_released_after_discovery;
mod empty_folder_set_is_ready;
mod reinitialize_rediscovers_workspaces;
mod unquotable_folders_are_skipped;

use crate::common::engine::FakeEngine;
use crate::common::notifier::RecordingNotifier;
use cmbridge::areas::orchestrator::WorkspaceOrchestrator;
use std::sync::Arc;

fn orchestrator(engine: &FakeEngine) -> (WorkspaceOrchestrator, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let orchestrator = WorkspaceOrchestrator::new(engine.options())
        .with_bootstrap_dir(engine.bootstrap_dir())
        .with_notifier(notifier.clone());

    (orchestrator, notifier)
}

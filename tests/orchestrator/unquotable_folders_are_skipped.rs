use super::orchestrator;
use crate::common::engine::{FakeEngine, engine, sandbox};
use crate::common::workspace::{create_folder, create_workspace};
use assert_fs::TempDir;
use cmbridge::areas::orchestrator::OrchestratorState;
use cmbridge::errors::DiscoveryError;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn unquotable_folders_are_skipped(engine: FakeEngine, sandbox: TempDir) {
    let odd = create_folder(sandbox.path(), "odd\nname");
    let root = create_workspace(&sandbox, "wk-a");
    let (orchestrator, notifier) = orchestrator(&engine);

    let diagnostics = orchestrator.initialize(&[odd.clone(), root]).await;

    assert_eq!(orchestrator.state(), OrchestratorState::Ready);
    assert_eq!(orchestrator.len().await, 1);
    assert!(matches!(
        diagnostics.as_slice(),
        [DiscoveryError::NotFound(folder)] if *folder == odd
    ));
    assert!(notifier.messages().is_empty());

    orchestrator.dispose().await;
}

use super::orchestrator;
use crate::common::engine::{FakeEngine, engine, sandbox};
use crate::common::workspace::create_workspace;
use assert_fs::TempDir;
use cmbridge::areas::orchestrator::OrchestratorState;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn reinitialize_rediscovers_workspaces(engine: FakeEngine, sandbox: TempDir) {
    let a = create_workspace(&sandbox, "wk-a");
    let b = create_workspace(&sandbox, "wk-b");
    let (orchestrator, _) = orchestrator(&engine);
    orchestrator.initialize(&[a.clone()]).await;
    let first = orchestrator.workspaces().await;

    let diagnostics = orchestrator.reinitialize(&[a.clone(), b.clone()]).await;

    assert!(diagnostics.is_empty());
    assert_eq!(orchestrator.state(), OrchestratorState::Ready);
    assert_eq!(orchestrator.len().await, 2);
    assert!(!first[0].is_usable());

    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(engine.live_shells(), expected);

    orchestrator.shutdown_all().await;
    orchestrator.dispose().await;
}

use super::orchestrator;
use crate::common::engine::{FakeEngine, engine};
use cmbridge::areas::orchestrator::OrchestratorState;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn empty_folder_set_is_ready(engine: FakeEngine) {
    let (orchestrator, notifier) = orchestrator(&engine);

    let diagnostics = orchestrator.initialize(&[]).await;

    assert!(diagnostics.is_empty());
    assert_eq!(orchestrator.state(), OrchestratorState::Ready);
    assert!(orchestrator.is_empty().await);
    assert!(notifier.messages().is_empty());
    assert!(engine.live_shells().is_empty());
}

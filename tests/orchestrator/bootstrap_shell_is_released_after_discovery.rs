use super::orchestrator;
use crate::common::engine::{FakeEngine, engine, sandbox};
use crate::common::workspace::create_workspace;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn bootstrap_shell_is_released_after_discovery(engine: FakeEngine, sandbox: TempDir) {
    let mut roots = vec![
        create_workspace(&sandbox, "wk-a"),
        create_workspace(&sandbox, "wk-b"),
    ];
    let (orchestrator, _) = orchestrator(&engine);

    orchestrator.initialize(&roots).await;

    roots.sort();
    let live = engine.live_shells();
    assert_eq!(live, roots);
    assert!(!live.contains(&engine.bootstrap_dir().to_path_buf()));

    orchestrator.shutdown_all().await;
    orchestrator.dispose().await;
}

use crate::common::engine::{FakeEngine, engine, sandbox};
use crate::common::workspace::refuse_shell;
use assert_fs::TempDir;
use cmbridge::areas::channel::{ChannelState, ProcessChannel};
use cmbridge::errors::ChannelError;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn missing_executable_fails_to_start(engine: FakeEngine, sandbox: TempDir) {
    let options = engine
        .options()
        .with_executable(sandbox.path().join("no-such-cm"));
    let channel = ProcessChannel::new(sandbox.path(), options);

    assert!(!channel.start().await);
    assert_eq!(channel.state(), ChannelState::Stopped);
    assert_eq!(channel.execute("version").await, Err(ChannelError::NotRunning));
}

#[rstest]
#[tokio::test]
async fn shell_exiting_before_health_check_fails_to_start(engine: FakeEngine, sandbox: TempDir) {
    refuse_shell(sandbox.path());
    let channel = ProcessChannel::new(sandbox.path(), engine.options());

    assert!(!channel.start().await);
    assert_eq!(channel.state(), ChannelState::Stopped);
    assert!(engine.live_shells().is_empty());
}

#[rstest]
#[tokio::test]
async fn failed_start_is_not_retried(engine: FakeEngine, sandbox: TempDir) {
    refuse_shell(sandbox.path());
    let channel = ProcessChannel::new(sandbox.path(), engine.options());
    assert!(!channel.start().await);

    std::fs::remove_file(sandbox.path().join(".fakerefuse")).expect("Failed to remove marker");

    assert!(!channel.start().await);
    assert_eq!(channel.state(), ChannelState::Stopped);
    assert!(engine.live_shells().is_empty());
}

use crate::common::engine::{FakeEngine, engine, sandbox};
use assert_fs::TempDir;
use cmbridge::areas::channel::{ChannelState, ProcessChannel};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn start_passes_health_check(engine: FakeEngine, sandbox: TempDir) {
    let channel = ProcessChannel::new(sandbox.path(), engine.options());

    assert_eq!(channel.state(), ChannelState::NotStarted);
    assert!(channel.start().await);
    assert_eq!(channel.state(), ChannelState::Running);
    assert_eq!(channel.requests_sent(), 1);
    assert_eq!(engine.live_shells(), vec![sandbox.path().to_path_buf()]);

    let response = channel.execute("echo hello world").await.expect("echo failed");

    assert!(response.is_success());
    assert_eq!(response.lines, vec!["hello world".to_string()]);
    assert_eq!(channel.requests_sent(), 2);

    channel.stop().await;
}

#[rstest]
#[tokio::test]
async fn second_start_reuses_the_running_shell(engine: FakeEngine, sandbox: TempDir) {
    let channel = ProcessChannel::new(sandbox.path(), engine.options());

    assert!(channel.start().await);
    assert!(channel.start().await);

    assert_eq!(channel.requests_sent(), 1);
    assert_eq!(engine.live_shells().len(), 1);

    channel.stop().await;
}

#[rstest]
#[tokio::test]
async fn unknown_command_reports_its_exit_code(engine: FakeEngine, sandbox: TempDir) {
    let channel = ProcessChannel::new(sandbox.path(), engine.options());
    assert!(channel.start().await);

    let response = channel.execute("frobnicate").await.expect("exchange failed");

    assert_eq!(response.exit_code, 2);
    assert_eq!(response.lines, vec!["unknown command: frobnicate".to_string()]);
    assert!(channel.is_running());

    channel.stop().await;
}

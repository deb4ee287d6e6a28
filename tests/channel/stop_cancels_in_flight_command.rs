use crate::common::engine::{FakeEngine, engine, sandbox};
use crate::common::workspace::set_mode;
use assert_fs::TempDir;
use cmbridge::areas::channel::{ChannelState, ProcessChannel};
use cmbridge::commands::porcelain::status::status_command;
use cmbridge::errors::ChannelError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[tokio::test]
async fn stop_cancels_in_flight_command(engine: FakeEngine, sandbox: TempDir) {
    let channel = ProcessChannel::new(sandbox.path(), engine.options());
    assert!(channel.start().await);
    set_mode(sandbox.path(), "slow");
    let command = status_command();

    let (pending, ()) = tokio::join!(channel.execute(&command), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        channel.stop().await
    });

    assert_eq!(pending, Err(ChannelError::ProcessExited));
    assert_eq!(channel.state(), ChannelState::Stopped);
    assert!(engine.live_shells().is_empty());
}

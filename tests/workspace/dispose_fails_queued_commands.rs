use super::started_handle;
use crate::common::engine::{FakeEngine, engine, sandbox};
use assert_fs::TempDir;
use cmbridge::areas::channel::ChannelState;
use cmbridge::errors::ChannelError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[tokio::test]
async fn dispose_fails_queued_commands(engine: FakeEngine, sandbox: TempDir) {
    let handle = started_handle(&engine, sandbox.path()).await;

    let (in_flight, queued, ()) = tokio::join!(
        handle.run("slowecho first"),
        async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            handle.run("echo second").await
        },
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            handle.dispose().await
        },
    );

    assert_eq!(in_flight, Err(ChannelError::ProcessExited));
    assert_eq!(queued, Err(ChannelError::NotRunning));
    assert!(!handle.is_usable());
    assert_eq!(handle.channel().state(), ChannelState::Disposed);
}

#[rstest]
#[tokio::test]
async fn dispose_twice_is_harmless(engine: FakeEngine, sandbox: TempDir) {
    let handle = started_handle(&engine, sandbox.path()).await;

    handle.dispose().await;
    handle.dispose().await;

    assert_eq!(handle.run("version").await, Err(ChannelError::NotRunning));
    assert!(engine.live_shells().is_empty());
}

use super::started_handle;
use crate::common::engine::{FakeEngine, engine, sandbox};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Mutex;
use std::time::Duration;

#[rstest]
#[tokio::test]
async fn commands_reach_the_shell_in_arrival_order(engine: FakeEngine, sandbox: TempDir) {
    let handle = started_handle(&engine, sandbox.path()).await;
    let completed = Mutex::new(Vec::new());

    let (queue, log) = (&handle, &completed);
    let run = move |command: &'static str, delay: u64| async move {
        tokio::time::sleep(Duration::from_millis(delay)).await;
        let response = queue.run(command).await.expect("queued command failed");
        log.lock()
            .expect("completion lock poisoned")
            .extend(response.lines);
    };

    tokio::join!(
        run("slowecho first", 0),
        run("echo second", 50),
        run("echo third", 100),
    );

    assert_eq!(
        completed.into_inner().expect("completion lock poisoned"),
        vec!["first".to_string(), "second".to_string(), "third".to_string()]
    );
    // one health check plus the three queued commands
    assert_eq!(handle.channel().requests_sent(), 4);

    handle.dispose().await;
}

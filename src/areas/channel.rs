use crate::artifacts::shell::options::ShellOptions;
use crate::artifacts::shell::protocol::{
    CommandResponse, EXIT_COMMAND, HEALTH_CHECK_COMMAND, ResponseFrame, frame_request,
};
use crate::errors::ChannelError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    NotStarted,
    Running,
    Stopped,
    Disposed,
}

/// A live shell process and its pipes
#[derive(Debug)]
struct ShellSession {
    child: Child,
    stdin: ChildStdin,
    stdout: mpsc::UnboundedReceiver<String>,
    readers: Vec<JoinHandle<()>>,
    // responses given up on after a timeout whose terminators are still due
    abandoned: usize,
}

impl ShellSession {
    async fn shutdown(mut self, grace: Duration, working_dir: &Path) {
        if let Ok(request) = frame_request(EXIT_COMMAND) {
            let _ = self.stdin.write_all(request.as_bytes()).await;
            let _ = self.stdin.flush().await;
        }
        drop(self.stdin);

        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(Ok(status)) => {
                tracing::debug!("shell at {} exited with {status}", working_dir.display())
            }
            Ok(Err(e)) => tracing::warn!("unable to wait for shell at {}: {e}", working_dir.display()),
            Err(_) => {
                tracing::warn!(
                    "shell at {} ignored exit for {grace:?}, killing it",
                    working_dir.display()
                );
                let _ = self.child.kill().await;
            }
        }

        self.readers.iter().for_each(JoinHandle::abort);
    }

    fn abort(mut self) {
        let _ = self.child.start_kill();
        self.readers.iter().for_each(JoinHandle::abort);
    }
}

/// One persistent shell process, driven by request/response exchanges over its
/// standard streams.
///
/// The channel runs a single exchange at a time: a concurrent `execute` is
/// rejected with `ChannelError::Busy` instead of being interleaved. Callers that
/// share a channel are expected to queue in front of it.
#[derive(Debug)]
pub struct ProcessChannel {
    working_dir: PathBuf,
    options: ShellOptions,
    state: watch::Sender<ChannelState>,
    session: Mutex<Option<ShellSession>>,
    requests: AtomicU64,
    disposed: AtomicBool,
}

impl ProcessChannel {
    pub fn new(working_dir: impl Into<PathBuf>, options: ShellOptions) -> Self {
        let (state, _) = watch::channel(ChannelState::NotStarted);

        ProcessChannel {
            working_dir: working_dir.into(),
            options,
            state,
            session: Mutex::new(None),
            requests: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn options(&self) -> &ShellOptions {
        &self.options
    }

    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.state() == ChannelState::Running
    }

    /// Number of requests written to the shell so far
    pub fn requests_sent(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Launches the shell and waits for it to pass a health check.
    ///
    /// Returns false instead of failing when the process cannot be spawned or
    /// does not answer within the start timeout.
    pub async fn start(&self) -> bool {
        if self.state() != ChannelState::NotStarted {
            return self.is_running();
        }

        let mut slot = self.session.lock().await;
        if self.state() != ChannelState::NotStarted {
            return self.is_running();
        }

        let mut session = match self.spawn() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(
                    "unable to launch `{}` in {}: {e}",
                    self.options.display_executable(),
                    self.working_dir.display()
                );
                self.state.send_replace(ChannelState::Stopped);
                return false;
            }
        };

        self.state.send_replace(ChannelState::Running);
        let handshake = self
            .exchange(&mut session, HEALTH_CHECK_COMMAND, self.options.start_timeout)
            .await;

        match handshake {
            Ok(response) if response.is_success() && self.is_running() => {
                tracing::info!("shell started in {}", self.working_dir.display());
                *slot = Some(session);
                true
            }
            outcome => {
                tracing::warn!(
                    "shell in {} failed its health check: {outcome:?}",
                    self.working_dir.display()
                );
                // a concurrent dispose already moved the state on
                self.state.send_if_modified(|state| {
                    let running = *state == ChannelState::Running;
                    if running {
                        *state = ChannelState::Stopped;
                    }
                    running
                });
                session.abort();
                false
            }
        }
    }

    /// Sends one command line and waits for its framed response
    pub async fn execute(&self, command: &str) -> Result<CommandResponse, ChannelError> {
        if !self.is_running() {
            return Err(ChannelError::NotRunning);
        }

        let mut slot = self.session.try_lock().map_err(|_| ChannelError::Busy)?;
        if !self.is_running() {
            return Err(ChannelError::NotRunning);
        }
        let Some(session) = slot.as_mut() else {
            return Err(ChannelError::NotRunning);
        };

        let result = self
            .exchange(session, command, self.options.command_timeout)
            .await;

        if result == Err(ChannelError::ProcessExited) && self.is_running() {
            tracing::warn!(
                "shell in {} exited while running `{command}`",
                self.working_dir.display()
            );
            self.state.send_replace(ChannelState::Stopped);
            if let Some(session) = slot.take() {
                session.abort();
            }
        }

        if self.disposed.load(Ordering::SeqCst) {
            if let Some(session) = slot.take() {
                session.abort();
            }
        }

        result
    }

    /// Asks the shell to exit, killing it after the grace period. Idempotent.
    pub async fn stop(&self) {
        self.state.send_if_modified(|state| match state {
            ChannelState::NotStarted | ChannelState::Running => {
                *state = ChannelState::Stopped;
                true
            }
            _ => false,
        });

        // an in-flight exchange observes the state change and releases the slot
        let session = self.session.lock().await.take();
        if let Some(session) = session {
            session
                .shutdown(self.options.stop_grace, &self.working_dir)
                .await;
        }
    }

    /// Releases the process and its pipes. Only the first call has an effect.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.state.send_replace(ChannelState::Disposed);

        match self.session.try_lock() {
            Ok(mut slot) => {
                if let Some(session) = slot.take() {
                    session.abort();
                }
            }
            Err(_) => tracing::debug!(
                "shell in {} busy, released once its command returns",
                self.working_dir.display()
            ),
        }
    }

    fn spawn(&self) -> io::Result<ShellSession> {
        let executable = &self.options.executable;
        if executable.components().count() > 1 && !is_executable::is_executable(executable) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not an executable file", executable.display()),
            ));
        }

        let mut child = Command::new(executable)
            .args(&self.options.arguments)
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("shell stdin is not piped"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("shell stdout is not piped"))?;

        let (lines_tx, lines_rx) = mpsc::unbounded_channel();
        let mut readers = vec![tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if lines_tx.send(line).is_err() {
                    break;
                }
            }
        })];

        if let Some(stderr) = child.stderr.take() {
            let working_dir = self.working_dir.clone();
            readers.push(tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    tracing::debug!("shell stderr ({}): {line}", working_dir.display());
                }
            }));
        }

        Ok(ShellSession {
            child,
            stdin,
            stdout: lines_rx,
            readers,
            abandoned: 0,
        })
    }

    async fn exchange(
        &self,
        session: &mut ShellSession,
        command: &str,
        timeout: Duration,
    ) -> Result<CommandResponse, ChannelError> {
        let request = frame_request(command)?;
        self.discard_unsolicited(session)?;

        let id = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!("#{id} -> {command}");

        session
            .stdin
            .write_all(request.as_bytes())
            .await
            .map_err(|_| ChannelError::ProcessExited)?;
        session
            .stdin
            .flush()
            .await
            .map_err(|_| ChannelError::ProcessExited)?;

        let mut state = self.state.subscribe();
        let mut frame = ResponseFrame::new();
        let read = async {
            loop {
                tokio::select! {
                    line = session.stdout.recv() => {
                        let Some(line) = line else {
                            return Err(ChannelError::ProcessExited);
                        };
                        let Some(response) = frame.push(line) else {
                            continue;
                        };
                        if session.abandoned > 0 {
                            session.abandoned -= 1;
                            tracing::debug!("#{id} skipped a late response");
                            continue;
                        }
                        return response;
                    }
                    _ = state.wait_for(|state| *state != ChannelState::Running) => {
                        return Err(ChannelError::ProcessExited);
                    }
                }
            }
        };

        let outcome = tokio::time::timeout(timeout, read).await;
        match outcome {
            Ok(response) => {
                tracing::debug!("#{id} <- {response:?}");
                response
            }
            Err(_) => {
                tracing::warn!("#{id} `{command}` timed out after {timeout:?}");
                session.abandoned += 1;
                Err(ChannelError::Timeout(timeout))
            }
        }
    }

    // Output nobody asked for: banners, or the tail of a response that timed out
    fn discard_unsolicited(&self, session: &mut ShellSession) -> Result<(), ChannelError> {
        let mut stale = ResponseFrame::new();

        loop {
            match session.stdout.try_recv() {
                Ok(line) => {
                    tracing::debug!("discarding unsolicited output: {line}");
                    if stale.push(line).is_some() {
                        session.abandoned = session.abandoned.saturating_sub(1);
                    }
                }
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => return Err(ChannelError::ProcessExited),
            }
        }
    }
}

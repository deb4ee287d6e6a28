use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_EXECUTABLE: &str = "cm";
pub const DEFAULT_ARGUMENTS: [&str; 2] = ["shell", "--encoding=UTF-8"];
pub const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(3);

/// How to launch a shell and how long to wait on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
    pub executable: PathBuf,
    pub arguments: Vec<String>,
    /// Bound on spawn plus the initial health check
    pub start_timeout: Duration,
    /// Bound on a single request/response exchange
    pub command_timeout: Duration,
    /// How long `stop` waits for a graceful exit before killing the process
    pub stop_grace: Duration,
}

impl Default for ShellOptions {
    fn default() -> Self {
        ShellOptions {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            arguments: DEFAULT_ARGUMENTS.iter().map(|arg| arg.to_string()).collect(),
            start_timeout: DEFAULT_START_TIMEOUT,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            stop_grace: DEFAULT_STOP_GRACE,
        }
    }
}

impl ShellOptions {
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeouts(mut self, start: Duration, command: Duration, stop_grace: Duration) -> Self {
        self.start_timeout = start;
        self.command_timeout = command;
        self.stop_grace = stop_grace;
        self
    }

    pub fn display_executable(&self) -> String {
        self.executable.display().to_string()
    }
}

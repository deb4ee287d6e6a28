use crate::errors::ChannelError;

pub const HEALTH_CHECK_COMMAND: &str = "version";
pub const EXIT_COMMAND: &str = "exit";
pub const TERMINATOR_MARKER: &str = "CommandResult";

/// Output of one command: every payload line the shell printed before the terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub exit_code: i32,
    pub lines: Vec<String>,
}

impl CommandResponse {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Converts a non-zero exit code into `ChannelError::CommandFailed`
    pub fn into_success(self) -> Result<Vec<String>, ChannelError> {
        if self.is_success() {
            Ok(self.lines)
        } else {
            Err(ChannelError::CommandFailed {
                exit_code: self.exit_code,
                output: self.lines,
            })
        }
    }
}

/// Accumulates stdout lines until a terminator closes the current response.
///
/// The reader side delivers whole lines, so a response split across several
/// pipe writes is simply pushed line by line.
#[derive(Debug, Default)]
pub struct ResponseFrame {
    lines: Vec<String>,
}

impl ResponseFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some` once the terminator has been seen
    pub fn push(&mut self, line: String) -> Option<Result<CommandResponse, ChannelError>> {
        let line = line.trim_end_matches(['\r', '\n']);

        match terminator_code(line) {
            Some(code) => {
                let lines = std::mem::take(&mut self.lines);

                Some(match code.parse::<i32>() {
                    Ok(exit_code) => Ok(CommandResponse { exit_code, lines }),
                    Err(_) => Err(ChannelError::MalformedResponse(format!(
                        "invalid terminator {line:?}"
                    ))),
                })
            }
            None => {
                self.lines.push(line.to_string());
                None
            }
        }
    }

    pub fn pending_lines(&self) -> usize {
        self.lines.len()
    }
}

// `CommandResult <code>` on a line of its own; anything else is payload
fn terminator_code(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(TERMINATOR_MARKER)?;

    if rest.is_empty() {
        return Some(rest);
    }

    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

/// Frames a request as a single line; embedded newlines would desynchronize the shell
pub fn frame_request(command: &str) -> Result<String, ChannelError> {
    if command.contains(['\n', '\r']) {
        return Err(ChannelError::InvalidRequest(format!(
            "request spans multiple lines: {command:?}"
        )));
    }

    Ok(format!("{command}\n"))
}

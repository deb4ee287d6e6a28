use crate::areas::channel::ProcessChannel;
use crate::artifacts::workspace::workspace_info::WorkspaceIdentity;
use crate::errors::ChannelError;
use std::path::Path;

pub const GET_WORKSPACE_FROM_PATH: &str = "getworkspacefrompath";
pub const WORKSPACE_INFO_FORMAT: &str = "{wkid}#{wkname}#{wkpath}";

pub fn get_workspace_from_path_command(path: &Path) -> Option<String> {
    let path = path.display().to_string();
    if path.contains(['"', '\n', '\r']) {
        return None;
    }

    Some(format!(
        "{GET_WORKSPACE_FROM_PATH} \"{path}\" --format={WORKSPACE_INFO_FORMAT}"
    ))
}

impl ProcessChannel {
    /// Resolves `path` to the workspace containing it, `None` when there is none
    pub async fn get_workspace_from_path(
        &self,
        path: &Path,
    ) -> Result<Option<WorkspaceIdentity>, ChannelError> {
        let Some(command) = get_workspace_from_path_command(path) else {
            tracing::warn!("cannot quote {} for the shell", path.display());
            return Ok(None);
        };

        let response = self.execute(&command).await?;
        if !response.is_success() {
            tracing::debug!(
                "{} is not inside a workspace (exit code {})",
                path.display(),
                response.exit_code
            );
            return Ok(None);
        }

        Ok(response
            .lines
            .iter()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| WorkspaceIdentity::try_parse(line)))
    }
}

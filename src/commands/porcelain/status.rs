use crate::areas::workspace::WorkspaceHandle;
use crate::artifacts::status::change_record::{ChangeRecord, FIELD_SEPARATOR, StatusLine};
use crate::artifacts::status::classifier::{NormalizedStatus, classify};
use crate::errors::ChannelError;
use std::path::Path;

pub fn status_command() -> String {
    format!("status --all --machinereadable --fieldseparator={FIELD_SEPARATOR}")
}

/// A pending change with its presentation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub record: ChangeRecord,
    pub status: NormalizedStatus,
}

impl StatusEntry {
    pub fn path(&self) -> &Path {
        self.record.path()
    }

    pub fn old_path(&self) -> Option<&Path> {
        self.record.old_path()
    }
}

impl From<ChangeRecord> for StatusEntry {
    fn from(record: ChangeRecord) -> Self {
        StatusEntry {
            status: classify(&record),
            record,
        }
    }
}

impl WorkspaceHandle {
    /// Pending changes in the order the shell reported them
    pub async fn run_status_query(&self) -> Result<Vec<ChangeRecord>, ChannelError> {
        let lines = self.run(&status_command()).await?.into_success()?;

        Ok(parse_status_output(&lines, self.identity().root()))
    }

    pub async fn status_entries(&self) -> Result<Vec<StatusEntry>, ChannelError> {
        let records = self.run_status_query().await?;

        Ok(records.into_iter().map(StatusEntry::from).collect())
    }
}

/// Parses machine-readable status output, skipping lines it cannot read
pub fn parse_status_output(lines: &[String], root: &Path) -> Vec<ChangeRecord> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match ChangeRecord::parse_line(line, root) {
            StatusLine::Record(record) => Some(record),
            StatusLine::Header => None,
            StatusLine::Malformed(reason) => {
                tracing::warn!("skipping status line {line:?}: {reason}");
                None
            }
        })
        .collect()
}

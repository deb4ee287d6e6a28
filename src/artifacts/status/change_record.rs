use crate::artifacts::status::change_kind::ChangeKind;
use std::path::{Path, PathBuf};

pub const FIELD_SEPARATOR: char = '#';
const HEADER_PREFIX: &str = "STATUS";

/// One path's pending change as reported by the shell.
///
/// The kind set is never empty: unchanged items are not represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    path: PathBuf,
    old_path: Option<PathBuf>,
    kind: ChangeKind,
}

/// Outcome of reading one line of machine-readable status output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Header,
    Record(ChangeRecord),
    Malformed(String),
}

impl ChangeRecord {
    pub fn try_new(path: PathBuf, old_path: Option<PathBuf>, kind: ChangeKind) -> Option<Self> {
        if kind.is_empty() {
            return None;
        }

        Some(ChangeRecord {
            path,
            old_path,
            kind,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn old_path(&self) -> Option<&Path> {
        self.old_path.as_deref()
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Parses `CODES#path[#oldpath]`, resolving relative paths against `root`
    pub fn parse_line(line: &str, root: &Path) -> StatusLine {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.starts_with(HEADER_PREFIX) {
            return StatusLine::Header;
        }

        let (codes, rest) = line.split_once(FIELD_SEPARATOR).unwrap_or((line, ""));
        let Some(kind) = ChangeKind::try_parse(codes) else {
            return StatusLine::Malformed(format!("unknown status codes {codes:?}"));
        };

        // only moves carry an old path; anywhere else `#` is part of the path
        let (path, old_path) = if kind.contains(ChangeKind::MOVED) {
            match rest.split_once(FIELD_SEPARATOR) {
                Some((path, old_path)) => (path, Some(old_path)),
                None => (rest, None),
            }
        } else {
            (rest.trim_end_matches(FIELD_SEPARATOR), None)
        };

        let path = match path.trim() {
            "" => return StatusLine::Malformed("missing path field".to_string()),
            path => root.join(path),
        };
        let old_path = old_path
            .map(str::trim)
            .filter(|old| !old.is_empty())
            .map(|old| root.join(old));

        match ChangeRecord::try_new(path, old_path, kind) {
            Some(record) => StatusLine::Record(record),
            None => StatusLine::Malformed("empty change kind".to_string()),
        }
    }
}

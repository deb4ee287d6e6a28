use crate::artifacts::status::change_kind::ChangeKind;
use crate::artifacts::status::change_record::ChangeRecord;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    Untracked,
    Added,
    Modified,
    Deleted,
}

impl ColorKey {
    /// Theme color an editor host paints the resource with. The terminal
    /// renderer maps `ColorKey` to ANSI colors itself.
    pub fn theme_key(self) -> &'static str {
        match self {
            ColorKey::Untracked => "gitDecoration.untrackedResourceForeground",
            ColorKey::Added => "gitDecoration.addedResourceForeground",
            ColorKey::Modified => "gitDecoration.modifiedResourceForeground",
            ColorKey::Deleted => "gitDecoration.deletedResourceForeground",
        }
    }
}

/// Closed icon vocabulary the presentation layer resolves to assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconKind {
    Private,
    Added,
    Changed,
    Moved,
    CheckedOut,
    Deleted,
}

impl IconKind {
    pub const ALL: [IconKind; 6] = [
        IconKind::Private,
        IconKind::Added,
        IconKind::Changed,
        IconKind::Moved,
        IconKind::CheckedOut,
        IconKind::Deleted,
    ];
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IconKind::Private => "private",
            IconKind::Added => "added",
            IconKind::Changed => "changed",
            IconKind::Moved => "moved",
            IconKind::CheckedOut => "checkedout",
            IconKind::Deleted => "deleted",
        };
        write!(f, "{name}")
    }
}

/// Presentation-ready view of a change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedStatus {
    pub letters: String,
    pub tooltip: String,
    pub color: ColorKey,
    pub icon: IconKind,
    pub strike_through: bool,
}

// A single flag's contribution to each derived field
struct Classification {
    color: ColorKey,
    icon: IconKind,
}

fn classification_of(kind: ChangeKind) -> Classification {
    let (color, icon) = if kind == ChangeKind::PRIVATE {
        (ColorKey::Untracked, IconKind::Private)
    } else if kind == ChangeKind::ADDED {
        (ColorKey::Added, IconKind::Added)
    } else if kind == ChangeKind::CHANGED {
        (ColorKey::Modified, IconKind::Changed)
    } else if kind == ChangeKind::MOVED {
        (ColorKey::Modified, IconKind::Moved)
    } else if kind == ChangeKind::CHECKED_OUT {
        (ColorKey::Modified, IconKind::CheckedOut)
    } else {
        (ColorKey::Deleted, IconKind::Deleted)
    };

    Classification { color, icon }
}

fn tooltip_of(kind: ChangeKind, record: &ChangeRecord) -> String {
    if kind == ChangeKind::PRIVATE {
        "Private".to_string()
    } else if kind == ChangeKind::ADDED {
        "Added".to_string()
    } else if kind == ChangeKind::CHANGED {
        "Changed".to_string()
    } else if kind == ChangeKind::MOVED {
        match record.old_path() {
            Some(old_path) => format!("Moved from {}", old_path.display()),
            None => "Moved".to_string(),
        }
    } else if kind == ChangeKind::CHECKED_OUT {
        "Checked Out".to_string()
    } else {
        "Deleted".to_string()
    }
}

/// Derives the normalized status of a record.
///
/// Every field follows the `ChangeKind` priority order: tooltip, color and icon
/// come from the first set flag, the letters concatenate one letter per set
/// flag without deduplication.
///
/// # Panics
///
/// Panics on an empty kind set, which callers must never surface.
pub fn classify(record: &ChangeRecord) -> NormalizedStatus {
    let kind = record.kind();
    assert!(!kind.is_empty(), "unchanged record surfaced for {:?}", record.path());

    let letters = kind.iter().filter_map(ChangeKind::letter).collect::<String>();

    let first = kind.iter().next().unwrap_or(ChangeKind::DELETED);
    let Classification { color, icon } = classification_of(first);

    NormalizedStatus {
        letters,
        tooltip: tooltip_of(first, record),
        color,
        icon,
        strike_through: kind.contains(ChangeKind::DELETED),
    }
}

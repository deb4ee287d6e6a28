use crate::artifacts::status::classifier::{ColorKey, IconKind, NormalizedStatus};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconTheme {
    Light,
    Dark,
}

impl IconTheme {
    pub const ALL: [IconTheme; 2] = [IconTheme::Light, IconTheme::Dark];

    fn directory(self) -> &'static str {
        match self {
            IconTheme::Light => "light",
            IconTheme::Dark => "dark",
        }
    }
}

fn asset_name(icon: IconKind) -> &'static str {
    match icon {
        IconKind::Private => "status-unversioned",
        IconKind::Added => "status-added",
        IconKind::Changed | IconKind::CheckedOut => "status-modified",
        IconKind::Moved => "status-renamed",
        IconKind::Deleted => "status-deleted",
    }
}

/// Icon assets for every theme, resolved once at startup
#[derive(Debug, Clone)]
pub struct IconSet {
    paths: HashMap<(IconTheme, IconKind), PathBuf>,
}

/// Everything an editor needs to render one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub light_icon: PathBuf,
    pub dark_icon: PathBuf,
    pub tooltip: String,
    pub color: ColorKey,
    pub strike_through: bool,
    pub faded: bool,
}

impl IconSet {
    pub fn from_root(root: &Path) -> Self {
        let paths = IconTheme::ALL
            .iter()
            .flat_map(|theme| {
                IconKind::ALL.iter().map(move |icon| {
                    let path = root
                        .join(theme.directory())
                        .join(format!("{}.svg", asset_name(*icon)));
                    ((*theme, *icon), path)
                })
            })
            .collect();

        IconSet { paths }
    }

    pub fn icon_path(&self, theme: IconTheme, icon: IconKind) -> &Path {
        // every (theme, icon) pair is populated by `from_root`
        self.paths
            .get(&(theme, icon))
            .map(PathBuf::as_path)
            .unwrap_or(Path::new(""))
    }

    pub fn decorate(&self, status: &NormalizedStatus) -> Decoration {
        Decoration {
            light_icon: self.icon_path(IconTheme::Light, status.icon).to_path_buf(),
            dark_icon: self.icon_path(IconTheme::Dark, status.icon).to_path_buf(),
            tooltip: status.tooltip.clone(),
            color: status.color,
            strike_through: status.strike_through,
            faded: false,
        }
    }
}

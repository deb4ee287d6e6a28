use crate::artifacts::shell::options::ShellOptions;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;

/// Top-level key under which this tool's settings live
pub const NAMESPACE: &str = "cmbridge";

const CHANGE_CAPACITY: usize = 16;

/// A typed setting addressed by its key path below `NAMESPACE`
#[derive(Debug)]
pub struct Setting<T> {
    path: &'static [&'static str],
    _value: PhantomData<fn() -> T>,
}

impl<T> Setting<T> {
    pub const fn new(path: &'static [&'static str]) -> Self {
        assert!(!path.is_empty(), "setting path must not be empty");

        Setting {
            path,
            _value: PhantomData,
        }
    }

    pub fn path(&self) -> &'static [&'static str] {
        self.path
    }

    /// Dotted key including the namespace, e.g. `cmbridge.shell.stopGraceMs`
    pub fn key(&self) -> String {
        std::iter::once(NAMESPACE)
            .chain(self.path.iter().copied())
            .collect::<Vec<_>>()
            .join(".")
    }
}

pub mod settings {
    use super::Setting;

    pub const CM_EXECUTABLE: Setting<String> = Setting::new(&["cm", "executable"]);
    pub const CM_ARGUMENTS: Setting<Vec<String>> = Setting::new(&["cm", "arguments"]);
    pub const SHELL_START_TIMEOUT_MS: Setting<u64> = Setting::new(&["shell", "startTimeoutMs"]);
    pub const SHELL_COMMAND_TIMEOUT_MS: Setting<u64> =
        Setting::new(&["shell", "commandTimeoutMs"]);
    pub const SHELL_STOP_GRACE_MS: Setting<u64> = Setting::new(&["shell", "stopGraceMs"]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationChange {
    affects_namespace: bool,
}

impl ConfigurationChange {
    pub fn affects_namespace(&self) -> bool {
        self.affects_namespace
    }
}

/// Editor settings tree with typed lookups and change notifications
#[derive(Debug)]
pub struct Configuration {
    tree: RwLock<Value>,
    any_changes: broadcast::Sender<ConfigurationChange>,
    namespace_changes: broadcast::Sender<ConfigurationChange>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::from_value(Value::Object(Default::default()))
    }
}

impl Configuration {
    pub fn from_value(tree: Value) -> Self {
        let (any_changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let (namespace_changes, _) = broadcast::channel(CHANGE_CAPACITY);

        Configuration {
            tree: RwLock::new(tree),
            any_changes,
            namespace_changes,
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read settings file {}", path.display()))?;
        let tree = serde_json::from_str::<Value>(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))?;

        Ok(Self::from_value(tree))
    }

    pub fn get<T: DeserializeOwned>(&self, setting: &Setting<T>, default: T) -> T {
        self.get_opt(setting).unwrap_or(default)
    }

    pub fn get_opt<T: DeserializeOwned>(&self, setting: &Setting<T>) -> Option<T> {
        let tree = self.tree.read().unwrap_or_else(PoisonError::into_inner);
        let value = setting
            .path()
            .iter()
            .try_fold(tree.get(NAMESPACE)?, |node, key| node.get(key))?;

        match serde_json::from_value(value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("ignoring setting {}: {e}", setting.key());
                None
            }
        }
    }

    /// Swaps in a new settings tree and notifies subscribers of what changed
    pub fn replace(&self, new_tree: Value) {
        let change = {
            let mut tree = self.tree.write().unwrap_or_else(PoisonError::into_inner);
            if *tree == new_tree {
                return;
            }

            let affects_namespace = tree.get(NAMESPACE) != new_tree.get(NAMESPACE);
            *tree = new_tree;
            ConfigurationChange { affects_namespace }
        };

        // sending fails only when nobody is subscribed
        let _ = self.any_changes.send(change);
        if change.affects_namespace {
            let _ = self.namespace_changes.send(change);
        }
    }

    /// Notified on every settings change
    pub fn subscribe_any(&self) -> broadcast::Receiver<ConfigurationChange> {
        self.any_changes.subscribe()
    }

    /// Notified only when a setting under `NAMESPACE` changed
    pub fn subscribe(&self) -> broadcast::Receiver<ConfigurationChange> {
        self.namespace_changes.subscribe()
    }
}

impl ShellOptions {
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let defaults = ShellOptions::default();
        let millis = |setting: &Setting<u64>, default: Duration| {
            configuration
                .get_opt(setting)
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        ShellOptions {
            executable: configuration
                .get_opt(&settings::CM_EXECUTABLE)
                .map(Into::into)
                .unwrap_or(defaults.executable),
            arguments: configuration.get(&settings::CM_ARGUMENTS, defaults.arguments),
            start_timeout: millis(&settings::SHELL_START_TIMEOUT_MS, defaults.start_timeout),
            command_timeout: millis(&settings::SHELL_COMMAND_TIMEOUT_MS, defaults.command_timeout),
            stop_grace: millis(&settings::SHELL_STOP_GRACE_MS, defaults.stop_grace),
        }
    }
}

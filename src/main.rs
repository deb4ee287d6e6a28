use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmbridge::areas::configuration::Configuration;
use cmbridge::areas::orchestrator::{OrchestratorState, UserNotifier, WorkspaceOrchestrator};
use cmbridge::artifacts::shell::options::ShellOptions;
use cmbridge::artifacts::status::classifier::ColorKey;
use colored::Colorize;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cmbridge",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Track version-control workspaces through persistent engine shells",
    long_about = "This tool keeps one `cm shell` process open per workspace found under the \
    given folders and queries it for pending changes, instead of spawning a new \
    process for every query.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "JSON settings file")]
    config: Option<PathBuf>,
    #[arg(long = "cm", global = true, help = "Path to the engine executable")]
    executable: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "workspaces",
        about = "List the workspaces found under the given folders",
        long_about = "This command resolves every folder to its workspace and lists each \
        distinct workspace once, even when several folders belong to it."
    )]
    Workspaces {
        #[arg(index = 1, help = "Root folders (defaults to the current directory)")]
        folders: Vec<PathBuf>,
    },
    #[command(
        name = "status",
        about = "Show pending changes of every workspace under the given folders",
        long_about = "This command prints one line per pending change with its status letters, \
        path and description."
    )]
    Status {
        #[arg(index = 1, help = "Root folders (defaults to the current directory)")]
        folders: Vec<PathBuf>,
    },
}

struct StderrNotifier;

impl UserNotifier for StderrNotifier {
    fn show_error(&self, message: &str) {
        eprintln!("{} {message}", "error:".red().bold());
    }
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_folders(folders: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if folders.is_empty() {
        return Ok(vec![std::env::current_dir()?]);
    }

    folders
        .iter()
        .map(|folder| {
            folder
                .canonicalize()
                .with_context(|| format!("folder {} is not accessible", folder.display()))
        })
        .collect()
}

fn paint(text: &str, color: ColorKey) -> colored::ColoredString {
    match color {
        ColorKey::Untracked => text.bright_black(),
        ColorKey::Added => text.green(),
        ColorKey::Modified => text.yellow(),
        ColorKey::Deleted => text.red(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    let configuration = match &cli.config {
        Some(path) => Configuration::load(path)?,
        None => Configuration::default(),
    };
    let mut options = ShellOptions::from_configuration(&configuration);
    if let Some(executable) = &cli.executable {
        options = options.with_executable(executable);
    }

    let folders = match &cli.command {
        Commands::Workspaces { folders } | Commands::Status { folders } => {
            resolve_folders(folders)?
        }
    };

    let orchestrator = WorkspaceOrchestrator::new(options).with_notifier(Arc::new(StderrNotifier));
    orchestrator.initialize(&folders).await;
    if orchestrator.state() == OrchestratorState::Failed {
        anyhow::bail!("no workspace could be loaded");
    }

    for workspace in orchestrator.workspaces().await {
        let identity = workspace.identity();

        match &cli.command {
            Commands::Workspaces { .. } => {
                println!("{}\t{}\t{}", identity.id(), identity.name(), identity.root().display());
            }
            Commands::Status { .. } => {
                let header = format!("{} ({})", identity.name(), identity.root().display());
                println!("{}", header.as_str().bold());

                match workspace.status_entries().await {
                    Ok(entries) => entries.iter().for_each(|entry| {
                        let path = entry
                            .path()
                            .strip_prefix(identity.root())
                            .unwrap_or(entry.path())
                            .display()
                            .to_string();
                        let path = if entry.status.strike_through {
                            path.as_str().strikethrough().to_string()
                        } else {
                            path
                        };

                        println!(
                            "{:>3} {}  ({})",
                            paint(&entry.status.letters, entry.status.color),
                            path,
                            entry.status.tooltip
                        );
                    }),
                    Err(e) => StderrNotifier.show_error(&format!(
                        "unable to read status of {}: {e}",
                        identity.name()
                    )),
                }
            }
        }
    }

    orchestrator.shutdown_all().await;
    orchestrator.dispose().await;

    Ok(())
}

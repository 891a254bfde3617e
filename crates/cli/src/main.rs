use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::Notify;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vellum_picker::{Backends, ChannelDialogs, FilePicker};
use vellum_storage::{FsDeviceImport, LocalStore, MountClient};
use vellum_types::{DialogHost, PickerMode};
use vellum_util::{VellumConfig, default_config_dir, expand_tilde, load_config, load_config_from_path};

mod consumers;

use consumers::{OpenCapture, SaveDocument};

const LOG_ENV: &str = "VELLUM_LOG";
const LOG_FILE_NAME: &str = "vellum.log";

#[derive(Debug, Parser)]
#[command(name = "vellum", version, about = "Open and save documents through a storage picker")]
struct Cli {
    /// Configuration file (defaults to $VELLUM_CONFIG_PATH or the user config directory).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Local document store, overriding `storagePath`.
    #[arg(long, global = true, value_name = "FILE")]
    storage: Option<PathBuf>,

    /// Log destination; the terminal belongs to the picker while it runs.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick a document and print its content.
    Open {
        /// Write the content here instead of stdout.
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Pick a target and save INPUT's content there.
    Save {
        /// Document to save.
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => load_config_from_path(&expand_path(path)),
        None => load_config(),
    }
    .context("load configuration")?;
    let storage_path = cli.storage.as_deref().map_or_else(|| config.storage_path(), expand_path);
    let store = LocalStore::open(&storage_path).with_context(|| format!("open local store {}", storage_path.display()))?;

    let (channel_dialogs, pending_dialogs) = ChannelDialogs::new(16);
    let dialogs: Arc<dyn DialogHost> = Arc::new(channel_dialogs);
    let finished = Arc::new(Notify::new());

    match cli.command {
        Command::Open { output } => {
            let capture = OpenCapture::new(finished.clone());
            let picker = FilePicker::builder(PickerMode::Open, build_backends(&config, &store, &dialogs), dialogs.clone())
                .default_file_name(config.default_file_name.clone())
                .on_open(capture.clone())
                .on_cancel(cancel_signal(&finished))
                .build();
            vellum_tui::run_app(Arc::new(picker), pending_dialogs, finished).await?;

            let Some(content) = capture.take() else {
                info!("open cancelled");
                return Ok(ExitCode::FAILURE);
            };
            match output {
                Some(path) => fs::write(&path, content).with_context(|| format!("write {}", path.display()))?,
                None => print!("{content}"),
            }
        }
        Command::Save { input } => {
            let content = fs::read_to_string(&input).with_context(|| format!("read {}", input.display()))?;
            let document = SaveDocument::new(content, finished.clone());
            let picker = FilePicker::builder(PickerMode::Save, build_backends(&config, &store, &dialogs), dialogs.clone())
                .default_file_name(config.default_file_name.clone())
                .on_save(document.clone())
                .on_cancel(cancel_signal(&finished))
                .build();
            vellum_tui::run_app(Arc::new(picker), pending_dialogs, finished).await?;

            let Some(path) = document.saved_to() else {
                info!("save cancelled");
                return Ok(ExitCode::FAILURE);
            };
            println!("{path}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn build_backends(config: &VellumConfig, store: &LocalStore, dialogs: &Arc<dyn DialogHost>) -> Backends {
    let mut backends = Backends::new(store.root());
    for mount in &config.mounts {
        backends = backends.with_remote(Arc::new(MountClient::from(mount)));
    }
    if config.device_import {
        backends = backends.with_device(Arc::new(FsDeviceImport::new(dialogs.clone())));
    }
    backends
}

fn cancel_signal(finished: &Arc<Notify>) -> impl Fn() + Send + Sync + 'static {
    let finished = finished.clone();
    move || finished.notify_one()
}

fn expand_path(path: &Path) -> PathBuf {
    expand_tilde(&path.to_string_lossy())
}

/// Logs go to a file, filtered by `VELLUM_LOG` (default `info`).
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let path = log_file.map_or_else(|| default_config_dir().join(LOG_FILE_NAME), expand_path);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use vellum_util::MountConfig;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_apply_to_subcommands() {
        let cli = Cli::try_parse_from(["vellum", "save", "doc.json", "--storage", "/tmp/store.json"]).unwrap();
        assert_eq!(cli.storage.as_deref(), Some(Path::new("/tmp/store.json")));
        assert!(matches!(cli.command, Command::Save { ref input } if input == Path::new("doc.json")));

        let cli = Cli::try_parse_from(["vellum", "open", "-o", "out.json"]).unwrap();
        assert!(matches!(cli.command, Command::Open { output: Some(_) }));
    }

    #[test]
    fn mounts_become_remotes_and_device_follows_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = VellumConfig {
            device_import: false,
            mounts: vec![MountConfig {
                id: "notes".into(),
                label: None,
                path: dir.path().display().to_string(),
            }],
            ..VellumConfig::default()
        };
        let store = LocalStore::ephemeral();
        let (dialogs, _pending) = ChannelDialogs::new(1);
        let dialogs: Arc<dyn DialogHost> = Arc::new(dialogs);

        let backends = build_backends(&config, &store, &dialogs);
        assert_eq!(backends.remotes().count(), 1);
        assert!(backends.device().is_none());
    }
}

pub mod core;
mod headless;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::core::config::ShellConfig;
use crate::core::error::{FetchError, ShellResult};
use crate::core::http::build_api_client;
use crate::core::shell::Shell;
use crate::core::state::{JsonFileStore, SessionStateCoordinator};
use crate::core::version::{probe_for, RemoteVersionFetcher};

pub use crate::core::error::ShellError;
pub use crate::core::gate::AsyncLoadGate;
pub use crate::core::shell::ShellHandle;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,modshell_lib=debug")),
        )
        .init();
}

/// Headless run: resolve the game version once and report the outcome.
pub async fn run() -> ShellResult<()> {
    init_tracing();
    info!("ModShell starting...");

    let config = ShellConfig::load();
    let client = build_api_client().map_err(FetchError::Transport)?;

    let store = JsonFileStore::open(config.settings_path());
    let coordinator = SessionStateCoordinator::new(
        Box::new(headless::LogPresentation),
        Box::new(store),
        Box::<headless::LogCatalog>::default(),
    );
    let fetcher = RemoteVersionFetcher::http(client, config.api_url.clone());
    let probe = probe_for(config.install_dir.as_deref(), &config.version_file);

    let shell = Shell::start(coordinator, fetcher, probe);
    let loaded = shell.handle().wait_for_versions().await;
    let snapshot = shell.join().await?;

    info!(
        "Versions loaded: {}, effective version {:?}, mods {:?}, view {}",
        loaded,
        snapshot.effective_version,
        snapshot.mods_availability,
        snapshot.session.active_view
    );
    Ok(())
}

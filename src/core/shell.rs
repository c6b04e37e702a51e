// ─── Shell Runtime ───
// Startup wiring. The coordinator is owned by a single task (the UI context);
// the version fetch and the local probe run on background tasks and report
// back through a oneshot channel, UI actions arrive through an mpsc channel.
// Every mutation of session or persisted state therefore happens on one task.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::core::error::{FetchError, ShellError, ShellResult};
use crate::core::gate::AsyncLoadGate;
use crate::core::state::{SessionSnapshot, SessionStateCoordinator, View};
use crate::core::version::{LocalVersionProbe, RemoteVersionFetcher, VersionList};

/// What the background load reports to the UI context.
struct FetchOutcome {
    versions: Result<VersionList, FetchError>,
    installed: Option<String>,
}

enum Command {
    Navigate(View, oneshot::Sender<ShellResult<()>>),
    SelectVersion(String, oneshot::Sender<ShellResult<()>>),
    AgreeToTerms(oneshot::Sender<ShellResult<()>>),
    Install(oneshot::Sender<ShellResult<()>>),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}

/// Clonable access to a running shell.
#[derive(Debug, Clone)]
pub struct ShellHandle {
    commands: mpsc::UnboundedSender<Command>,
    gate: AsyncLoadGate,
}

impl ShellHandle {
    /// Resolved once the version load has been reconciled (or has failed).
    pub fn gate(&self) -> &AsyncLoadGate {
        &self.gate
    }

    /// Wait for the version load; `true` when a game version was selected.
    pub async fn wait_for_versions(&self) -> bool {
        self.gate.wait().await
    }

    pub async fn navigate(&self, view: View) -> ShellResult<()> {
        self.request(|reply| Command::Navigate(view, reply)).await?
    }

    pub async fn select_version(&self, version: impl Into<String>) -> ShellResult<()> {
        let version = version.into();
        self.request(|reply| Command::SelectVersion(version, reply))
            .await?
    }

    pub async fn agree_to_terms(&self) -> ShellResult<()> {
        self.request(Command::AgreeToTerms).await?
    }

    pub async fn install(&self) -> ShellResult<()> {
        self.request(Command::Install).await?
    }

    pub async fn snapshot(&self) -> ShellResult<SessionSnapshot> {
        self.request(Command::Snapshot).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> ShellResult<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(make(reply))
            .map_err(|_| ShellError::Other("Shell has stopped".into()))?;
        response
            .await
            .map_err(|_| ShellError::Other("Shell has stopped".into()))
    }
}

/// A started shell: the UI task plus a handle to talk to it.
#[derive(Debug)]
pub struct Shell {
    handle: ShellHandle,
    ui_task: JoinHandle<SessionSnapshot>,
}

impl Shell {
    /// Restore the last view, start loading versions in the background and
    /// begin serving commands. Must be called inside a tokio runtime.
    pub fn start(
        coordinator: SessionStateCoordinator,
        fetcher: RemoteVersionFetcher,
        probe: Arc<dyn LocalVersionProbe>,
    ) -> Self {
        let gate = AsyncLoadGate::new();
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (fetch_tx, fetch_rx) = oneshot::channel();

        tokio::spawn(load_versions(fetcher, probe, fetch_tx));
        let ui_task = tokio::spawn(run_ui(coordinator, gate.clone(), commands_rx, fetch_rx));

        Self {
            handle: ShellHandle {
                commands: commands_tx,
                gate,
            },
            ui_task,
        }
    }

    pub fn handle(&self) -> ShellHandle {
        self.handle.clone()
    }

    /// Stop the UI task and return the final session state.
    pub async fn join(self) -> ShellResult<SessionSnapshot> {
        let _ = self.handle.commands.send(Command::Shutdown);
        self.ui_task
            .await
            .map_err(|e| ShellError::Other(format!("UI task failed: {e}")))
    }
}

async fn load_versions(
    fetcher: RemoteVersionFetcher,
    probe: Arc<dyn LocalVersionProbe>,
    report: oneshot::Sender<FetchOutcome>,
) {
    let installed = tokio::task::spawn_blocking(move || probe.detect());
    let versions = fetcher.fetch().await;
    let installed = installed.await.unwrap_or_else(|e| {
        warn!("Installed version probe failed: {}", e);
        None
    });

    if report.send(FetchOutcome { versions, installed }).is_err() {
        debug!("Shell stopped before the version load finished");
    }
}

async fn run_ui(
    mut coordinator: SessionStateCoordinator,
    gate: AsyncLoadGate,
    mut commands: mpsc::UnboundedReceiver<Command>,
    mut fetched: oneshot::Receiver<FetchOutcome>,
) -> SessionSnapshot {
    if let Err(e) = coordinator.restore_last_view() {
        warn!("Could not restore last view: {}", e);
    }

    let mut fetch_pending = true;
    loop {
        tokio::select! {
            outcome = &mut fetched, if fetch_pending => {
                fetch_pending = false;
                let outcome = outcome.unwrap_or(FetchOutcome {
                    versions: Err(FetchError::Interrupted),
                    installed: None,
                });
                let success = apply_fetch(&mut coordinator, outcome);
                if let Err(e) = gate.resolve(success) {
                    error!("{}", e);
                }
            }
            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => handle_command(&mut coordinator, command),
            },
        }
    }

    info!("Shell stopped");
    coordinator.snapshot()
}

/// Reconcile and gate on the UI context. Returns the gate outcome.
fn apply_fetch(coordinator: &mut SessionStateCoordinator, outcome: FetchOutcome) -> bool {
    match outcome.versions {
        Ok(versions) => {
            match coordinator.on_versions_fetched(versions, outcome.installed.as_deref()) {
                Ok(result) => !result.effective_version.is_empty(),
                Err(e) => {
                    error!("Could not persist version state: {}", e);
                    false
                }
            }
        }
        Err(e) => {
            coordinator.on_fetch_failed(&e);
            false
        }
    }
}

fn handle_command(coordinator: &mut SessionStateCoordinator, command: Command) {
    // A dropped reply receiver only means the caller stopped waiting.
    match command {
        Command::Navigate(view, reply) => {
            let _ = reply.send(coordinator.navigate(view));
        }
        Command::SelectVersion(version, reply) => {
            let _ = reply.send(coordinator.select_version(&version));
        }
        Command::AgreeToTerms(reply) => {
            let _ = reply.send(coordinator.agree_to_terms());
        }
        Command::Install(reply) => {
            let _ = reply.send(coordinator.install());
        }
        Command::Snapshot(reply) => {
            let _ = reply.send(coordinator.snapshot());
        }
        Command::Shutdown => {}
    }
}

pub mod fetcher;
pub mod list;
pub mod probe;
pub mod reconcile;

pub use fetcher::{HttpVersionSource, RemoteVersionFetcher, VersionSource, DEFAULT_VERSION_URL};
pub use list::VersionList;
pub use probe::{probe_for, InstallDirProbe, LocalVersionProbe, NoProbe, DEFAULT_VERSION_FILE};
pub use reconcile::{reconcile, ReconciliationResult};

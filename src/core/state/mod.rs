pub mod collaborators;
pub mod coordinator;
pub mod persisted;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use collaborators::{Feature, ModCatalog, Notice, Presentation};
pub use coordinator::{Availability, SessionSnapshot, SessionStateCoordinator};
pub use persisted::PersistedVersionState;
pub use session::{SessionState, View};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};

// ─── ModShell Core ───
// Game version resolution and session coordination for the mod manager.
//
// Architecture:
//   core/
//     version/  Remote version list, local probe, reconciliation
//     state/    Settings store, session state, coordinator + UI seams
//     gate      One-shot "versions loaded" signal
//     shell     Single-owner UI task and background loading
//     config    Data dir and endpoint configuration

pub mod config;
pub mod error;
pub mod gate;
pub mod http;
pub mod shell;
pub mod state;
pub mod version;

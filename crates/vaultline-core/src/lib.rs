//! vaultline-core - Shared functionality for the vaultline tool
//!
//! Per-user file locations, terminal colour handling and log setup.

pub mod logging;
pub mod output;
pub mod paths;

pub use output::Colors;
pub use paths::Paths;

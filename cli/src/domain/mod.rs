//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod base_href;
pub mod bundle;
pub mod config;
pub mod error;
pub mod installation;

pub use base_href::{BaseHrefOutcome, rewrite_base_href};
pub use bundle::{BundleEntry, BundlePath, DeployPlan, EntryAction};
pub use config::SetupConfig;
pub use error::SetupError;
pub use installation::{InstallationInfo, InstallationKind};

//! Command implementations

pub mod deploy;
pub mod detect;
pub mod version;

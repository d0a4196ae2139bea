//! Configuration layer for posture-audit.
//!
//! - `types`: configuration type definitions
//! - `loading`: file loading and discovery

mod error;
mod loading;
mod types;

pub use error::ConfigError;
pub use types::{Config, RunSettings};

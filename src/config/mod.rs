//! Configuration loading and management for the payroll engine.
//!
//! This module loads engine defaults, server settings and the seed
//! employee roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Serving on {}", config.server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, PayrollConfig, RosterConfig, ServerSettings};

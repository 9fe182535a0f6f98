mod config;
mod error;
pub mod operations;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use config::{ConfigOverrides, ResolvedConfig, resolve_config};
pub use error::{ConfigError, OperationError, Result};

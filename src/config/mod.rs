#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{verdict_exit_code, CliCommand, CliConfig};
pub use toml_config::{CatalogConfig, CouponEntry};

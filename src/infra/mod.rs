mod cli_runtime;
pub mod config;

pub use cli_runtime::CliRuntime;
pub use config::{AppConfig, Settings};

//! Application configuration

mod app_config;

pub use app_config::{AppConfig, EnvVarsConfig, LogFormat, LoggingConfig, SourcesConfig};

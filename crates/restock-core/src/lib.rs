pub mod app_config;
pub mod config;
pub mod inventory;
pub mod photos;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use inventory::{
    allowed_values, canonicalize, price_label, Field, Schema, DEFAULT_STATUS, NORMALIZED_SCHEMA,
};
pub use photos::{pick_cover, PhotoRef, PhotoRole};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid {field} '{value}'; allowed: {}", allowed.join(", "))]
    InvalidValue {
        field: Field,
        value: String,
        allowed: Vec<&'static str>,
    },
}

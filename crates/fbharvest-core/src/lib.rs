pub mod accounts;
pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod identity;
pub mod locale;
pub mod month;
pub mod naming;
pub mod post;

pub use accounts::load_account_urls;
pub use aggregate::{aggregate, aggregate_by_identity};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use identity::identity_hash;
pub use locale::DateLocale;
pub use month::TargetMonth;
pub use post::{PostRecord, ReactionTriple, SummaryRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid target month \"{raw}\": {reason}")]
    InvalidTargetMonth { raw: String, reason: String },

    #[error("unparsable timestamp \"{raw}\": {reason}")]
    InvalidTimestamp { raw: String, reason: String },

    #[error("not a reaction capture file name: {0}")]
    InvalidArtifactName(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("configuration validation failed: {0}")]
    Validation(String),

    #[error("failed to read account list {path}: {source}")]
    AccountListIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

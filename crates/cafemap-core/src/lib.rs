pub mod app_config;
pub mod category;
pub mod config;
pub mod record;
pub mod regions;

use thiserror::Error;

pub use app_config::AppConfig;
pub use category::{classify, Category, HIGH_RATING_THRESHOLD};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{
    record_key, record_path, sanitize_name, CafeRecord, Review, ServiceFlags,
    WEEKDAY_TEXT_NOT_PROVIDED,
};
pub use regions::{load_regions, CityConfig, Region, RegionsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read regions file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse regions file: {0}")]
    RegionsFileParse(#[from] serde_yaml::Error),

    #[error("regions validation failed: {0}")]
    Validation(String),
}

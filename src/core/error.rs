use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoliticsError {
    #[error("Advisor error: {0}")]
    AdvisorError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid mini-game outcome: {0}")]
    InvalidOutcome(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PoliticsError>;

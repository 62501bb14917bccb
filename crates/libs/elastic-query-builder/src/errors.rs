use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryBuilderError>;

#[derive(Debug, Error)]
pub enum QueryBuilderError {
    #[error("Invalid search category '{0}'")]
    InvalidCategory(String),

    #[error("Failed to load query settings: {0}")]
    Settings(#[from] config::ConfigError),
}

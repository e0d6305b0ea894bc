use thiserror::Error;

pub type PulseResult<T> = Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported attribution model: {0}")]
    UnsupportedModel(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PulseError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

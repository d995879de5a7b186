use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecommendError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not enough tracks for genre \"{genre}\": found {found}, need {required}")]
    InsufficientData {
        genre: String,
        found: usize,
        required: usize,
    },
}

pub type RecommendResult<T> = Result<T, RecommendError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiftError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid index config: {0}")]
    InvalidConfig(String),

    #[error("line of {0} bytes exceeds the indexable maximum")]
    LineTooLong(usize),
}

pub type Result<T> = std::result::Result<T, SiftError>;

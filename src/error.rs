use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Transport(String),
}

impl AppError {
    /// The human-readable detail shown to the user, without any prefix.
    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::Transport(msg) => msg,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

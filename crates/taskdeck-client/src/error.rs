use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<taskdeck_core::Error> for Error {
    fn from(err: taskdeck_core::Error) -> Self {
        match err {
            taskdeck_core::Error::TaskNotFound(id) => Error::NotFound(id),
            taskdeck_core::Error::Validation(msg) => Error::Validation(msg),
            other => Error::Other(anyhow::Error::new(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

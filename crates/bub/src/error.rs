use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reply delivery failed: {0}")]
    Delivery(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error(transparent)]
    Core(#[from] bub_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

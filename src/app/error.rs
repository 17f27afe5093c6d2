use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("No products found on page")]
    NotFound,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("{context} failed: {status} - {body}")]
    Remote {
        context: &'static str,
        status: u16,
        body: String,
    },
    #[error("Required tool not found: {0}")]
    ToolNotFound(String),
    #[error("{0}")]
    Backend(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn is_tool_not_found(&self) -> bool {
        matches!(self, Error::ToolNotFound(_))
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Document has not been started")]
    NotStarted,
    #[error("Document was already started")]
    AlreadyStarted,
    #[error("Other rendering error: {0}")]
    Other(String),
}

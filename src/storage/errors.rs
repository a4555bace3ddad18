use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    #[error("Persistence is unavailable: {0}")]
    Unavailable(String),
    #[error("Persistence returned an invalid response: {0}")]
    InvalidResponse(String)
}

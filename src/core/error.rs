use thiserror::Error;

/// Agent-wide error model. Nothing here is retried: every variant ends the
/// current question cycle.
#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("no question provided")]
    EmptyQuestion,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("authentication rejected (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ResearchError {
    /// True for errors raised locally before any request is sent.
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            ResearchError::MissingCredential(_)
                | ResearchError::EmptyQuestion
                | ResearchError::Config(_)
        )
    }
}

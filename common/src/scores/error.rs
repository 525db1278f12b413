use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    InvalidEndpoint(String),
    Transport(String),
    Timeout,
    /// The peer answered with a non-2xx status.
    Status(u16),
    InvalidBody(String),
    Exhausted { attempts: u32, last: Box<SubmitError> },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::InvalidEndpoint(e) => write!(f, "Invalid score endpoint: {}", e),
            SubmitError::Transport(e) => write!(f, "Transport error: {}", e),
            SubmitError::Timeout => write!(f, "Request timed out"),
            SubmitError::Status(status) => write!(f, "HTTP error! status: {}", status),
            SubmitError::InvalidBody(e) => write!(f, "Invalid response body: {}", e),
            SubmitError::Exhausted { attempts, last } => {
                write!(f, "Gave up after {} attempts: {}", attempts, last)
            }
        }
    }
}

impl std::error::Error for SubmitError {}

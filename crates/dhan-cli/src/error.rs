use thiserror::Error;

use dhan_core::DhanError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] DhanError),

    #[error(transparent)]
    Validation(#[from] dhan_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Api(error) => match error {
                DhanError::Validation(_) | DhanError::Unsupported(_) => 2,
                DhanError::Remote { .. } | DhanError::Status { .. } => 3,
                DhanError::Serialization(_) => 4,
                DhanError::Transport(_) => 6,
            },
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

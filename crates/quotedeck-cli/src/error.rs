use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] quotedeck_core::ValidationError),

    #[error(transparent)]
    Source(#[from] quotedeck_core::SourceError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Command(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

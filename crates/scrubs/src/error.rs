use crate::api::types::InstanceId;

/// Errors surfaced by the scrubber engine and its hosts.
#[derive(Debug, thiserror::Error)]
pub enum ScrubsError {
    #[error("scrubs instance {0} is not bound")]
    NotBound(InstanceId),

    #[error("invalid scrubs options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("scrubs container must hold exactly two images, found {found}")]
    MissingImages { found: u32 },

    #[error("element already holds markup from a destroyed scrubber")]
    AlreadyBuilt,

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, ScrubsError>;

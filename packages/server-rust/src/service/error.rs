use clientrisk_core::{ClientId, InvalidRiskProfile};

/// Errors returned by [`ClientService`](super::ClientService) operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("client {id} not found")]
    NotFound { id: ClientId },
    #[error("invalid resource: {0}")]
    InvalidResource(#[from] InvalidRiskProfile),
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    /// Short label used for log fields and metric labels.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::InvalidResource(_) => "invalid_resource",
            ServiceError::Storage(_) => "storage",
        }
    }
}

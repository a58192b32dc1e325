//! Service-level error type

use crate::auth::AuthError;
use crate::models::ValidationError;
use crate::store::StoreError;

/// Outcome of a failed board operation
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("authentication required")]
    AuthenticationRequired,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} with this {field} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
    },

    #[error("{resource} '{id}' does not exist")]
    InvalidReference { resource: &'static str, id: String },

    /// The store failed; details are logged, not returned to callers.
    #[error("upstream failure: {0}")]
    Upstream(#[source] StoreError),
}

impl BoardError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for BoardError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, id } => Self::NotFound { resource, id },
            StoreError::Conflict { resource, field } => Self::Conflict { resource, field },
            StoreError::InvalidReference { resource, id } => {
                Self::InvalidReference { resource, id }
            }
            other => Self::Upstream(other),
        }
    }
}

impl From<AuthError> for BoardError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::AuthenticationRequired => Self::AuthenticationRequired,
        }
    }
}

pub type Result<T, E = BoardError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_kind() {
        let err: BoardError = StoreError::Conflict {
            resource: "category",
            field: "slug",
        }
        .into();
        assert!(matches!(err, BoardError::Conflict { field: "slug", .. }));

        let err: BoardError = StoreError::NotFound {
            resource: "job",
            id: "x".into(),
        }
        .into();
        assert_eq!(err.to_string(), "job 'x' not found");

        let err: BoardError = StoreError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, BoardError::Upstream(_)));
    }

    #[test]
    fn validation_message_passes_through() {
        let err: BoardError = ValidationError::Empty { field: "title" }.into();
        assert_eq!(err.to_string(), "title is required");
    }
}

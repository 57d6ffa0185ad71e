use alertcond_client::ApiError;
use alertcond_common::IdError;
use alertcond_condition::{ConditionError, ShapeError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("shape conflict: {0}")]
    ShapeConflict(#[from] ShapeError),
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(#[from] IdError),
    #[error("resource has no id; it has not been created")]
    MissingId,
    #[error("alert condition {0} not found")]
    RemoteNotFound(String),
    #[error("remote: {0}")]
    Remote(ApiError),
    #[error("mapping: {0}")]
    Mapping(ConditionError),
}

impl From<ConditionError> for ResourceError {
    fn from(e: ConditionError) -> Self {
        match e {
            ConditionError::Validation(v) => Self::Validation(v),
            ConditionError::Shape(s) => Self::ShapeConflict(s),
            ConditionError::Identifier(i) => Self::MalformedIdentifier(i),
            other => Self::Mapping(other),
        }
    }
}

impl ResourceError {
    /// Maps an API failure for the condition `id`; not-found stays distinct.
    pub(crate) fn remote(id: &str, e: ApiError) -> Self {
        match e {
            ApiError::NotFound => Self::RemoteNotFound(id.to_string()),
            other => Self::Remote(other),
        }
    }
}

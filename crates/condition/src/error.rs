use alertcond_common::IdError;

/// A field violated an enumerated, range, or presence constraint.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The document is neither cleanly metric-shaped nor cleanly NRQL-shaped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("{} must not be set on an NRQL condition", .0.join(", "))]
    MetricFieldsOnNrql(Vec<&'static str>),
    #[error("metric condition requires {0} (or set an nrql block)")]
    MissingMetricField(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ConditionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("shape conflict: {0}")]
    Shape(#[from] ShapeError),
    #[error("malformed identifier: {0}")]
    Identifier(#[from] IdError),
    #[error("entity id {0:?} is not an integer")]
    InvalidEntity(String),
}

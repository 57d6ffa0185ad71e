use alertcond_condition::AlertCondition;

/// Condition operations of the alerting API. Conditions are only addressable
/// together with their owning policy id.
#[async_trait::async_trait]
pub trait AlertsApi: Send + Sync {
    /// Creates `condition` under `condition.policy_id` and returns it with its
    /// assigned id.
    async fn create_condition(&self, condition: &AlertCondition) -> Result<AlertCondition, ApiError>;

    async fn get_condition(&self, policy_id: i64, id: i64) -> Result<AlertCondition, ApiError>;

    /// Replaces the condition identified by `condition.id`.
    async fn update_condition(&self, condition: &AlertCondition) -> Result<AlertCondition, ApiError>;

    async fn delete_condition(&self, policy_id: i64, id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("alert condition not found")]
    NotFound,
    #[error("unauthorized (status {0})")]
    Unauthorized(u16),
    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    /// The request never reached the server.
    #[error("connect: {0}")]
    Connect(String),
    /// The request may have been delivered (timeouts, resets mid-response).
    #[error("transport: {0}")]
    Transport(String),
    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Transport failures and server-side errors may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Transport(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether a non-idempotent request can be sent again. A request that may
    /// have reached the server is not, since it may already have taken effect.
    pub fn is_safe_to_resend(&self) -> bool {
        match self {
            Self::Connect(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

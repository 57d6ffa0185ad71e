pub mod ids;
pub mod logging;
pub mod retry;

pub use ids::{parse_ids, serialize_ids, ConditionId, IdError};

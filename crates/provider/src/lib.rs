//! The `alert_condition` resource: schema plus create/read/update/delete
//! callbacks over an [`AlertsApi`](alertcond_client::AlertsApi).

mod error;
mod resource;
pub mod schema;
mod state;

pub use error::ResourceError;
pub use resource::{AlertConditionResource, Resource, RESOURCE_TYPE};
pub use schema::{condition_schema, Attribute, AttributeType, ResourceSchema, ValueType};
pub use state::ResourceData;

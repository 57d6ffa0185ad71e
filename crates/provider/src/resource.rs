use std::sync::Arc;

use alertcond_client::AlertsApi;
use alertcond_common::{serialize_ids, ConditionId};
use alertcond_condition::{build, read_into, validate, ConditionConfig};

use crate::error::ResourceError;
use crate::schema::{condition_schema, ResourceSchema};
use crate::state::ResourceData;

pub const RESOURCE_TYPE: &str = "newrelic_alert_condition";

/// Lifecycle callbacks a configuration engine drives for one resource type.
///
/// Each callback either succeeds and updates `data`, or fails and leaves
/// `data` as it was.
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    fn name(&self) -> &'static str;

    fn schema(&self) -> ResourceSchema;

    async fn create(&self, data: &mut ResourceData) -> Result<(), ResourceError>;

    /// Refreshes `data` from the remote side. A condition that no longer
    /// exists clears the id and is not an error.
    async fn read(&self, data: &mut ResourceData) -> Result<(), ResourceError>;

    async fn update(&self, data: &mut ResourceData) -> Result<(), ResourceError>;

    async fn delete(&self, data: &mut ResourceData) -> Result<(), ResourceError>;

    /// Adopts an existing remote object by its composite id.
    async fn import(&self, id: &str) -> Result<ResourceData, ResourceError>;
}

pub struct AlertConditionResource {
    api: Arc<dyn AlertsApi>,
}

impl AlertConditionResource {
    pub fn new(api: Arc<dyn AlertsApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl Resource for AlertConditionResource {
    fn name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> ResourceSchema {
        condition_schema()
    }

    /// A not-found answer here names the policy rather than a condition, so
    /// it is reported as [`ResourceError::Remote`] instead of
    /// [`ResourceError::RemoteNotFound`], which is keyed by condition id.
    async fn create(&self, data: &mut ResourceData) -> Result<(), ResourceError> {
        validate(&data.config)?;
        let mut condition = build(&data.config)?;
        condition.policy_id = data.config.policy_id;

        tracing::info!(
            policy_id = condition.policy_id,
            name = %condition.name,
            "creating alert condition"
        );
        let created = self
            .api
            .create_condition(&condition)
            .await
            .map_err(ResourceError::Remote)?;

        let id = serialize_ids(&[data.config.policy_id, created.id]);
        tracing::info!(id = %id, "alert condition created");
        data.set_id(id);
        Ok(())
    }

    async fn read(&self, data: &mut ResourceData) -> Result<(), ResourceError> {
        let (raw, id) = data.condition_id()?;
        tracing::debug!(id = %raw, "reading alert condition");

        let condition = match self.api.get_condition(id.policy_id, id.condition_id).await {
            Ok(condition) => condition,
            Err(e) if e.is_not_found() => {
                tracing::warn!(id = %raw, "alert condition not found, removing from state");
                data.clear_id();
                return Ok(());
            }
            Err(e) => return Err(ResourceError::Remote(e)),
        };

        read_into(&condition, &mut data.config, &raw)?;
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData) -> Result<(), ResourceError> {
        validate(&data.config)?;
        let mut condition = build(&data.config)?;
        let (raw, id) = data.condition_id()?;
        condition.policy_id = id.policy_id;
        condition.id = id.condition_id;

        tracing::info!(id = %raw, name = %condition.name, "updating alert condition");
        let updated = self
            .api
            .update_condition(&condition)
            .await
            .map_err(|e| ResourceError::remote(&raw, e))?;

        read_into(&updated, &mut data.config, &raw)?;
        Ok(())
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<(), ResourceError> {
        let (raw, id) = data.condition_id()?;
        tracing::info!(id = %raw, "deleting alert condition");

        self.api
            .delete_condition(id.policy_id, id.condition_id)
            .await
            .map_err(|e| ResourceError::remote(&raw, e))?;

        data.clear_id();
        Ok(())
    }

    async fn import(&self, id: &str) -> Result<ResourceData, ResourceError> {
        let parsed: ConditionId = id.parse()?;
        let mut data = ResourceData::with_id(id, ConditionConfig::new(parsed.policy_id, ""));
        self.read(&mut data).await?;
        if !data.exists() {
            return Err(ResourceError::RemoteNotFound(id.to_string()));
        }
        Ok(data)
    }
}

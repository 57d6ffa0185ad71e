use alertcond_common::ConditionId;
use alertcond_condition::ConditionConfig;

use crate::error::ResourceError;

/// One resource instance as the configuration engine sees it: the document
/// plus the opaque handle assigned on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceData {
    id: Option<String>,
    pub config: ConditionConfig,
}

impl ResourceData {
    pub fn new(config: ConditionConfig) -> Self {
        Self { id: None, config }
    }

    pub fn with_id(id: impl Into<String>, config: ConditionConfig) -> Self {
        Self {
            id: Some(id.into()),
            config,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Marks the resource as gone.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    pub(crate) fn condition_id(&self) -> Result<(String, ConditionId), ResourceError> {
        let id = self.id.as_deref().ok_or(ResourceError::MissingId)?;
        Ok((id.to_string(), id.parse()?))
    }
}

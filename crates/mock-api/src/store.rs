use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use alertcond_condition::AlertCondition;
use dashmap::DashMap;

/// Conditions keyed by their API-assigned id. Each record keeps the owning
/// policy id in `AlertCondition::policy_id`.
#[derive(Clone)]
pub struct ConditionStore {
    conditions: Arc<DashMap<i64, AlertCondition>>,
    next_id: Arc<AtomicI64>,
}

impl Default for ConditionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionStore {
    pub fn new() -> Self {
        Self {
            conditions: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Stores `condition` under `policy_id` with a freshly assigned id.
    pub fn insert(&self, policy_id: i64, mut condition: AlertCondition) -> AlertCondition {
        condition.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        condition.policy_id = policy_id;
        self.conditions.insert(condition.id, condition.clone());
        condition
    }

    pub fn get(&self, id: i64) -> Option<AlertCondition> {
        self.conditions.get(&id).map(|c| c.clone())
    }

    pub fn list_for_policy(&self, policy_id: i64) -> Vec<AlertCondition> {
        let mut conditions: Vec<AlertCondition> = self
            .conditions
            .iter()
            .filter(|c| c.value().policy_id == policy_id)
            .map(|c| c.value().clone())
            .collect();
        conditions.sort_by_key(|c| c.id);
        conditions
    }

    /// Replaces the body of an existing condition, keeping its id and policy.
    pub fn update(&self, id: i64, mut condition: AlertCondition) -> Option<AlertCondition> {
        let mut entry = self.conditions.get_mut(&id)?;
        condition.id = id;
        condition.policy_id = entry.policy_id;
        *entry = condition.clone();
        Some(condition)
    }

    pub fn delete(&self, id: i64) -> bool {
        self.conditions.remove(&id).is_some()
    }

    pub fn count(&self) -> usize {
        self.conditions.len()
    }
}

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

use super::{auth, conditions, health};
use crate::store::ConditionStore;

#[derive(Clone)]
pub struct AppState {
    pub conditions: ConditionStore,
    pub api_key: Option<Arc<str>>,
    pub pending_faults: Arc<AtomicU32>,
}

impl AppState {
    pub fn new(conditions: ConditionStore, api_key: Option<String>) -> Self {
        Self {
            conditions,
            api_key: api_key.map(Arc::from),
            pending_faults: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Makes the next `n` API requests fail with 503.
    pub fn fail_next(&self, n: u32) {
        self.pending_faults.store(n, Ordering::SeqCst);
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/alerts_conditions.json", get(conditions::list_conditions))
        .route(
            "/alerts_conditions/policies/{policy_file}",
            post(conditions::create_condition),
        )
        .route(
            "/alerts_conditions/{condition_file}",
            put(conditions::update_condition).delete(conditions::delete_condition),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::api_key_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::fault_middleware,
        ));

    Router::new()
        .route("/healthz", get(health::healthz))
        .nest("/v2", api)
        .with_state(state)
}

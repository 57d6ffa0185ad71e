use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub conditions: usize,
}

pub async fn healthz(
    axum::extract::State(state): axum::extract::State<super::AppState>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        conditions: state.conditions.count(),
    })
}

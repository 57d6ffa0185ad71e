use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use alertcond_condition::model::{ConditionEnvelope, ConditionList};
use alertcond_condition::AlertCondition;

use crate::rest::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub policy_id: i64,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorTitle,
}

#[derive(Serialize)]
struct ErrorTitle {
    title: String,
}

fn unprocessable(title: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: ErrorTitle {
            title: title.into(),
        },
    };
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

/// Parses the `123.json` trailing path segment.
fn json_id(segment: &str) -> Result<i64, StatusCode> {
    segment
        .strip_suffix(".json")
        .and_then(|id| id.parse().ok())
        .ok_or(StatusCode::NOT_FOUND)
}

fn check_body(condition: &AlertCondition) -> Result<(), String> {
    if condition.name.trim().is_empty() {
        return Err("name can't be blank".into());
    }
    if condition.terms.is_empty() {
        return Err("terms must contain at least one term".into());
    }
    let metric_fields =
        condition.condition_type.is_some() || !condition.entities.is_empty() || !condition.metric.is_empty();
    if !condition.nrql.is_empty() && metric_fields {
        return Err("nrql conditions do not accept type, entities or metric".into());
    }
    if condition.nrql.is_empty()
        && (condition.condition_type.is_none() || condition.entities.is_empty() || condition.metric.is_empty())
    {
        return Err("type, entities and metric are required".into());
    }
    Ok(())
}

pub async fn list_conditions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ConditionList> {
    Json(ConditionList {
        conditions: state.conditions.list_for_policy(query.policy_id),
    })
}

pub async fn create_condition(
    State(state): State<AppState>,
    Path(policy_file): Path<String>,
    Json(body): Json<ConditionEnvelope>,
) -> Result<Response, StatusCode> {
    let policy_id = json_id(&policy_file)?;
    if let Err(title) = check_body(&body.condition) {
        return Ok(unprocessable(title));
    }

    let created = state.conditions.insert(policy_id, body.condition);
    tracing::info!(policy_id, id = created.id, name = %created.name, "condition created");
    Ok((StatusCode::CREATED, Json(ConditionEnvelope { condition: created })).into_response())
}

pub async fn update_condition(
    State(state): State<AppState>,
    Path(condition_file): Path<String>,
    Json(body): Json<ConditionEnvelope>,
) -> Result<Response, StatusCode> {
    let id = json_id(&condition_file)?;
    if state.conditions.get(id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    if let Err(title) = check_body(&body.condition) {
        return Ok(unprocessable(title));
    }

    let updated = state
        .conditions
        .update(id, body.condition)
        .ok_or(StatusCode::NOT_FOUND)?;
    tracing::info!(id, name = %updated.name, "condition updated");
    Ok(Json(ConditionEnvelope { condition: updated }).into_response())
}

pub async fn delete_condition(
    State(state): State<AppState>,
    Path(condition_file): Path<String>,
) -> Result<Json<ConditionEnvelope>, StatusCode> {
    let id = json_id(&condition_file)?;
    let existing = state.conditions.get(id).ok_or(StatusCode::NOT_FOUND)?;
    if !state.conditions.delete(id) {
        return Err(StatusCode::NOT_FOUND);
    }
    tracing::info!(id, "condition deleted");
    Ok(Json(ConditionEnvelope { condition: existing }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_id_parses_suffix() {
        assert_eq!(json_id("123.json"), Ok(123));
        assert_eq!(json_id("123"), Err(StatusCode::NOT_FOUND));
        assert_eq!(json_id("abc.json"), Err(StatusCode::NOT_FOUND));
    }
}

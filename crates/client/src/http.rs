use alertcond_common::retry::{retry_async, RetryConfig};
use alertcond_condition::model::ConditionEnvelope;
use alertcond_condition::AlertCondition;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::api::{AlertsApi, ApiError};

pub const API_KEY_HEADER: &str = "X-Api-Key";

/// [`AlertsApi`] over the REST v2 endpoints. Transient failures are retried
/// according to the configured [`RetryConfig`].
pub struct HttpAlertsClient {
    base_url: String,
    api_key: String,
    http: Client,
    retry: RetryConfig,
}

impl HttpAlertsClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    pub fn with_client(base_url: &str, api_key: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
    }

    /// Sends an idempotent request, retrying any transient failure.
    async fn send<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        self.send_with(ApiError::is_transient, build).await
    }

    async fn send_with<R, F>(&self, retryable: R, build: F) -> Result<Response, ApiError>
    where
        R: Fn(&ApiError) -> bool,
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        retry_async(&self.retry, retryable, || async move {
            let resp = build().send().await.map_err(transport_error)?;
            check_status(resp).await
        })
        .await
    }

    /// Fails with `NotFound` unless condition `id` belongs to `policy_id`.
    /// Condition ids are global on the API, so PUT and DELETE alone would
    /// act on another policy's condition.
    async fn ensure_owned(&self, policy_id: i64, id: i64) -> Result<(), ApiError> {
        self.get_condition(policy_id, id).await.map(|_| ())
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_connect() {
        ApiError::Connect(e.to_string())
    } else {
        ApiError::Transport(e.to_string())
    }
}

async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match status {
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(ApiError::Unauthorized(status.as_u16()))
        }
        _ => {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Picks condition `id` out of a policy's list. Only that entry is decoded
/// strictly, so conditions this crate cannot model do not break the read.
fn select_condition(entries: Vec<Value>, id: i64) -> Result<AlertCondition, ApiError> {
    let entry = entries
        .into_iter()
        .find(|c| c.get("id").and_then(Value::as_i64) == Some(id))
        .ok_or(ApiError::NotFound)?;
    serde_json::from_value(entry).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Deserialize)]
struct RawConditionList {
    #[serde(default)]
    conditions: Vec<Value>,
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl AlertsApi for HttpAlertsClient {
    async fn create_condition(&self, condition: &AlertCondition) -> Result<AlertCondition, ApiError> {
        let policy_id = condition.policy_id;
        let body = ConditionEnvelope {
            condition: condition.clone(),
        };
        tracing::debug!(policy_id, name = %condition.name, "POST alert condition");

        let path = format!("/alerts_conditions/policies/{policy_id}.json");
        let resp = self
            .send_with(ApiError::is_safe_to_resend, || {
                self.request(Method::POST, &path).json(&body)
            })
            .await?;

        let mut created = decode::<ConditionEnvelope>(resp).await?.condition;
        created.policy_id = policy_id;
        Ok(created)
    }

    async fn get_condition(&self, policy_id: i64, id: i64) -> Result<AlertCondition, ApiError> {
        tracing::debug!(policy_id, id, "GET alert conditions");

        let path = format!("/alerts_conditions.json?policy_id={policy_id}");
        let resp = self.send(|| self.request(Method::GET, &path)).await?;
        let list: RawConditionList = decode(resp).await?;

        let mut found = select_condition(list.conditions, id)?;
        found.policy_id = policy_id;
        Ok(found)
    }

    async fn update_condition(&self, condition: &AlertCondition) -> Result<AlertCondition, ApiError> {
        let id = condition.id;
        let body = ConditionEnvelope {
            condition: condition.clone(),
        };
        self.ensure_owned(condition.policy_id, id).await?;
        tracing::debug!(policy_id = condition.policy_id, id, "PUT alert condition");

        let path = format!("/alerts_conditions/{id}.json");
        let resp = self
            .send(|| self.request(Method::PUT, &path).json(&body))
            .await?;

        let mut updated = decode::<ConditionEnvelope>(resp).await?.condition;
        updated.policy_id = condition.policy_id;
        Ok(updated)
    }

    async fn delete_condition(&self, policy_id: i64, id: i64) -> Result<(), ApiError> {
        self.ensure_owned(policy_id, id).await?;
        tracing::debug!(policy_id, id, "DELETE alert condition");

        let path = format!("/alerts_conditions/{id}.json");
        self.send(|| self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use alertcond_mock_api::rest::{router, AppState};
use alertcond_mock_api::store::ConditionStore;

const KEY: &str = "test-key";

fn app_state() -> AppState {
    AppState::new(ConditionStore::new(), Some(KEY.into()))
}

fn metric_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "condition": {
            "type": "apm_app_metric",
            "name": name,
            "enabled": true,
            "entities": ["5678"],
            "metric": "apdex",
            "terms": [{
                "duration": "5",
                "operator": "below",
                "priority": "critical",
                "threshold": "0.75",
                "time_function": "all"
            }]
        }
    })
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", KEY)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let resp = router(app_state())
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_api_key_rejected() {
    let resp = router(app_state())
        .oneshot(
            Request::builder()
                .uri("/v2/alerts_conditions.json?policy_id=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_api_key_forbidden() {
    let resp = router(app_state())
        .oneshot(
            Request::builder()
                .uri("/v2/alerts_conditions.json?policy_id=1")
                .header("x-api-key", "nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_then_list() {
    let state = app_state();

    let resp = router(state.clone())
        .oneshot(json_request(
            "POST",
            "/v2/alerts_conditions/policies/42.json",
            &metric_body("cond-a"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["condition"]["id"], 1);
    assert_eq!(created["condition"]["terms"][0]["threshold"], "0.75");

    let resp = router(state.clone())
        .oneshot(empty_request("GET", "/v2/alerts_conditions.json?policy_id=42"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert_eq!(list["conditions"].as_array().unwrap().len(), 1);

    let resp = router(state)
        .oneshot(empty_request("GET", "/v2/alerts_conditions.json?policy_id=7"))
        .await
        .unwrap();
    let list = body_json(resp).await;
    assert!(list["conditions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_mixed_shape() {
    let mut body = metric_body("mixed");
    body["condition"]["nrql"] = serde_json::json!([{"query": "SELECT 1", "since_value": "3"}]);

    let resp = router(app_state())
        .oneshot(json_request(
            "POST",
            "/v2/alerts_conditions/policies/42.json",
            &body,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err = body_json(resp).await;
    assert!(err["error"]["title"].as_str().unwrap().contains("nrql"));
}

#[tokio::test]
async fn update_existing_condition() {
    let state = app_state();
    state.conditions.insert(
        42,
        serde_json::from_value(metric_body("before")["condition"].clone()).unwrap(),
    );

    let resp = router(state.clone())
        .oneshot(json_request(
            "PUT",
            "/v2/alerts_conditions/1.json",
            &metric_body("after"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["condition"]["name"], "after");
    assert_eq!(state.conditions.get(1).unwrap().policy_id, 42);
}

#[tokio::test]
async fn update_unknown_condition_not_found() {
    let resp = router(app_state())
        .oneshot(json_request(
            "PUT",
            "/v2/alerts_conditions/99.json",
            &metric_body("x"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let state = app_state();
    state.conditions.insert(
        42,
        serde_json::from_value(metric_body("doomed")["condition"].clone()).unwrap(),
    );

    let resp = router(state.clone())
        .oneshot(empty_request("DELETE", "/v2/alerts_conditions/1.json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = router(state)
        .oneshot(empty_request("DELETE", "/v2/alerts_conditions/1.json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn injected_faults_return_503_then_recover() {
    let state = app_state();
    state.fail_next(1);

    let resp = router(state.clone())
        .oneshot(empty_request("GET", "/v2/alerts_conditions.json?policy_id=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let resp = router(state)
        .oneshot(empty_request("GET", "/v2/alerts_conditions.json?policy_id=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

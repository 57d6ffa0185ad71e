//! Wire representation of alert conditions as the alerting REST API sends
//! and receives them.

use serde::{Deserialize, Serialize};

use crate::schema::{
    ConditionType, Operator, Priority, TimeFunction, UserDefinedValueFunction, ValueFunction,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertCondition {
    /// Assigned by the API on creation; zero until then.
    #[serde(default, skip_serializing_if = "is_unset")]
    pub id: i64,
    /// Carried in the request path, never in the body.
    #[serde(skip)]
    pub policy_id: i64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub condition_type: Option<ConditionType>,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metric: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub runbook_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition_scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_function: Option<ValueFunction>,
    #[serde(default)]
    pub terms: Vec<AlertConditionTerm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_defined: Option<AlertConditionUserDefined>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nrql: Vec<AlertConditionNrql>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConditionTerm {
    #[serde(with = "string_number")]
    pub duration: u32,
    pub operator: Operator,
    pub priority: Priority,
    #[serde(with = "string_number")]
    pub threshold: f64,
    pub time_function: TimeFunction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConditionUserDefined {
    pub metric: String,
    pub value_function: UserDefinedValueFunction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConditionNrql {
    pub query: String,
    #[serde(with = "string_number")]
    pub since_value: u32,
}

/// `{"condition": {...}}` request and response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionEnvelope {
    pub condition: AlertCondition,
}

/// `{"conditions": [...]}` list response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionList {
    #[serde(default)]
    pub conditions: Vec<AlertCondition>,
}

fn is_unset(id: &i64) -> bool {
    *id == 0
}

/// The API encodes term numbers as JSON strings; accept either form.
mod string_number {
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Text(String),
            Number(T),
        }

        match Repr::<T>::deserialize(deserializer)? {
            Repr::Text(s) => s.trim().parse().map_err(de::Error::custom),
            Repr::Number(n) => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AlertCondition {
        AlertCondition {
            id: 0,
            policy_id: 55,
            condition_type: Some(ConditionType::ApmAppMetric),
            name: "cond".into(),
            enabled: true,
            entities: vec!["123".into()],
            metric: "apdex".into(),
            runbook_url: String::new(),
            condition_scope: "application".into(),
            value_function: None,
            terms: vec![AlertConditionTerm {
                duration: 5,
                operator: Operator::Below,
                priority: Priority::Critical,
                threshold: 0.75,
                time_function: TimeFunction::All,
            }],
            user_defined: None,
            nrql: Vec::new(),
        }
    }

    #[test]
    fn serializes_numbers_as_strings() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["terms"][0]["duration"], "5");
        assert_eq!(json["terms"][0]["threshold"], "0.75");
        assert_eq!(json["type"], "apm_app_metric");
    }

    #[test]
    fn omits_unset_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("policy_id"));
        assert!(!obj.contains_key("runbook_url"));
        assert!(!obj.contains_key("nrql"));
        assert!(!obj.contains_key("user_defined"));
    }

    #[test]
    fn accepts_numbers_or_strings() {
        let json = r#"{
            "id": 9,
            "name": "n",
            "enabled": true,
            "terms": [
                {"duration": "10", "operator": "above", "priority": "warning", "threshold": "1.5", "time_function": "any"},
                {"duration": 5, "operator": "equal", "priority": "critical", "threshold": 2, "time_function": "all"}
            ],
            "nrql": [{"query": "SELECT 1", "since_value": "3"}]
        }"#;
        let cond: AlertCondition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.id, 9);
        assert_eq!(cond.terms[0].duration, 10);
        assert_eq!(cond.terms[0].threshold, 1.5);
        assert_eq!(cond.terms[1].threshold, 2.0);
        assert_eq!(cond.nrql[0].since_value, 3);
        assert_eq!(cond.policy_id, 0);
    }

    #[test]
    fn rejects_non_numeric_duration() {
        let json = r#"{"name": "n", "terms": [{"duration": "soon", "operator": "above", "priority": "warning", "threshold": "1", "time_function": "any"}]}"#;
        assert!(serde_json::from_str::<AlertCondition>(json).is_err());
    }

    #[test]
    fn envelope_wraps_condition() {
        let body = serde_json::to_value(ConditionEnvelope { condition: sample() }).unwrap();
        assert_eq!(body["condition"]["name"], "cond");
    }
}

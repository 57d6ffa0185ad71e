//! Declarative description of the resource's configuration attributes.
//!
//! This is the table a configuration engine uses to type-check and diff
//! documents; the authoritative checks live in
//! [`alertcond_condition::validate`].

use alertcond_condition::catalog::{NRQL_DURATIONS, SINCE_VALUES};
use alertcond_condition::{
    ConditionType, Operator, Priority, TimeFunction, UserDefinedValueFunction, ValueFunction,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Int,
    Float,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Scalar(ValueType),
    List(ValueType),
    Block(Vec<Attribute>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub required: bool,
    /// Changing the value replaces the remote object.
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    pub description: &'static str,
}

impl Attribute {
    pub fn required(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            required: true,
            force_new: false,
            default: None,
            allowed: Vec::new(),
            min_items: None,
            max_items: None,
            description: "",
        }
    }

    pub fn optional(name: &'static str, kind: AttributeType) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn one_of<T: ToString>(mut self, values: &[T]) -> Self {
        self.allowed = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn items(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_items = min;
        self.max_items = max;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub version: u32,
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

pub fn condition_schema() -> ResourceSchema {
    use AttributeType::{Block, List, Scalar};
    use ValueType::{Float, Int, String};

    let term = vec![
        Attribute::required("duration", Scalar(Int))
            .one_of(NRQL_DURATIONS)
            .describe("minutes; metric conditions allow only 5, 10, 15, 30, 60, 120"),
        Attribute::optional("operator", Scalar(String))
            .with_default(Operator::Equal.as_str())
            .one_of(Operator::VALUES),
        Attribute::optional("priority", Scalar(String))
            .with_default(Priority::Critical.as_str())
            .one_of(Priority::VALUES),
        Attribute::required("threshold", Scalar(Float)).describe("must be >= 0"),
        Attribute::required("time_function", Scalar(String)).one_of(TimeFunction::VALUES),
    ];

    let nrql = vec![
        Attribute::required("query", Scalar(String))
            .describe("NRQL query evaluated by the condition"),
        Attribute::required("since_value", Scalar(Int))
            .one_of(SINCE_VALUES)
            .describe("minutes of data each evaluation looks back over"),
    ];

    ResourceSchema {
        version: 0,
        attributes: vec![
            Attribute::required("policy_id", Scalar(Int)).force_new(),
            Attribute::required("name", Scalar(String)),
            Attribute::optional("type", Scalar(String))
                .one_of(ConditionType::VALUES)
                .describe("required for metric conditions, forbidden with nrql"),
            Attribute::optional("entities", List(Int))
                .items(Some(1), None)
                .describe("required for metric conditions, forbidden with nrql"),
            Attribute::optional("metric", Scalar(String))
                .describe("one of the metrics of `type`; forbidden with nrql"),
            Attribute::optional("runbook_url", Scalar(String)),
            Attribute::optional("condition_scope", Scalar(String)),
            Attribute::required("term", Block(term)).items(Some(1), None),
            Attribute::optional("value_function", Scalar(String))
                .with_default(ValueFunction::SingleValue.as_str())
                .one_of(ValueFunction::VALUES),
            Attribute::optional("nrql", Block(nrql))
                .items(None, Some(1))
                .describe("makes this an NRQL condition"),
            Attribute::optional("user_defined_metric", Scalar(String))
                .describe("set together with user_defined_value_function"),
            Attribute::optional("user_defined_value_function", Scalar(String))
                .one_of(UserDefinedValueFunction::VALUES),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_id_forces_replacement() {
        let schema = condition_schema();
        let policy = schema.attribute("policy_id").unwrap();
        assert!(policy.required);
        assert!(policy.force_new);
        assert!(!schema.attribute("name").unwrap().force_new);
    }

    #[test]
    fn term_block_requires_one_item() {
        let schema = condition_schema();
        let term = schema.attribute("term").unwrap();
        assert_eq!(term.min_items, Some(1));
        match &term.kind {
            AttributeType::Block(attrs) => {
                let operator = attrs.iter().find(|a| a.name == "operator").unwrap();
                assert_eq!(operator.default, Some("equal"));
                assert_eq!(operator.allowed, vec!["above", "below", "equal"]);
            }
            other => panic!("term is not a block: {other:?}"),
        }
    }

    #[test]
    fn type_lists_five_families() {
        let schema = condition_schema();
        assert_eq!(schema.attribute("type").unwrap().allowed.len(), 5);
    }

    #[test]
    fn serializes_for_display() {
        let json = serde_json::to_string(&condition_schema()).unwrap();
        assert!(json.contains("\"since_value\""));
        assert!(json.contains("\"force_new\":true"));
    }
}

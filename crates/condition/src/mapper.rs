use alertcond_common::ConditionId;

use crate::error::ConditionError;
use crate::model::{AlertCondition, AlertConditionNrql, AlertConditionTerm, AlertConditionUserDefined};
use crate::schema::{ConditionConfig, NrqlConfig, TermConfig};
use crate::validate::{check_shape, Shape};

/// Translates a condition document into the request body for the API.
///
/// Fails before producing anything when the document mixes metric and NRQL
/// fields or is missing a metric field, so the result never carries both.
pub fn build(config: &ConditionConfig) -> Result<AlertCondition, ConditionError> {
    let shape = check_shape(config)?;

    let mut condition = AlertCondition {
        id: 0,
        policy_id: config.policy_id,
        condition_type: None,
        name: config.name.clone(),
        enabled: true,
        entities: Vec::new(),
        metric: String::new(),
        runbook_url: config.runbook_url.clone().unwrap_or_default(),
        condition_scope: config.condition_scope.clone().unwrap_or_default(),
        value_function: Some(config.value_function),
        terms: config.term.iter().map(term_to_wire).collect(),
        user_defined: None,
        nrql: Vec::new(),
    };

    match shape {
        Shape::Nrql => {
            condition.nrql = config
                .nrql
                .iter()
                .map(|n| AlertConditionNrql {
                    query: n.query.clone(),
                    since_value: n.since_value,
                })
                .collect();
        }
        Shape::Metric => {
            condition.condition_type = config.condition_type;
            condition.metric = config.metric.clone().unwrap_or_default();
            condition.entities = config
                .entities
                .iter()
                .flatten()
                .map(|id| id.to_string())
                .collect();
        }
    }

    if let (Some(metric), Some(value_function)) =
        (&config.user_defined_metric, config.user_defined_value_function)
    {
        condition.user_defined = Some(AlertConditionUserDefined {
            metric: metric.clone(),
            value_function,
        });
    }

    Ok(condition)
}

/// Builds a fresh document from an API response addressed by `resource_id`.
pub fn read(condition: &AlertCondition, resource_id: &str) -> Result<ConditionConfig, ConditionError> {
    let mut config = ConditionConfig::new(0, String::new());
    read_into(condition, &mut config, resource_id)?;
    Ok(config)
}

/// Overwrites every field of `config` the API model carries. The policy id
/// comes from `resource_id`, since response bodies do not include it.
/// On error `config` is left unchanged.
pub fn read_into(
    condition: &AlertCondition,
    config: &mut ConditionConfig,
    resource_id: &str,
) -> Result<(), ConditionError> {
    let id: ConditionId = resource_id.parse()?;

    let entities = condition
        .entities
        .iter()
        .map(|e| {
            e.trim()
                .parse::<i64>()
                .map_err(|_| ConditionError::InvalidEntity(e.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    config.policy_id = id.policy_id;
    config.name = condition.name.clone();
    config.condition_type = condition.condition_type;
    config.metric = non_empty(&condition.metric);
    config.runbook_url = non_empty(&condition.runbook_url);
    config.condition_scope = non_empty(&condition.condition_scope);
    config.user_defined_metric = condition.user_defined.as_ref().map(|u| u.metric.clone());
    config.user_defined_value_function = condition.user_defined.as_ref().map(|u| u.value_function);
    config.value_function = condition.value_function.unwrap_or_default();
    config.entities = if entities.is_empty() { None } else { Some(entities) };
    config.term = condition.terms.iter().map(term_from_wire).collect();
    config.nrql = condition
        .nrql
        .iter()
        .map(|n| NrqlConfig {
            query: n.query.clone(),
            since_value: n.since_value,
        })
        .collect();

    Ok(())
}

fn term_to_wire(term: &TermConfig) -> AlertConditionTerm {
    AlertConditionTerm {
        duration: term.duration,
        operator: term.operator,
        priority: term.priority,
        threshold: term.threshold,
        time_function: term.time_function,
    }
}

fn term_from_wire(term: &AlertConditionTerm) -> TermConfig {
    TermConfig {
        duration: term.duration,
        operator: term.operator,
        priority: term.priority,
        threshold: term.threshold,
        time_function: term.time_function,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;
    use crate::schema::{
        ConditionType, Operator, Priority, TimeFunction, UserDefinedValueFunction, ValueFunction,
    };

    fn term(duration: u32, threshold: f64) -> TermConfig {
        TermConfig {
            duration,
            operator: Operator::Below,
            priority: Priority::Critical,
            threshold,
            time_function: TimeFunction::All,
        }
    }

    fn metric_condition() -> ConditionConfig {
        let mut cfg = ConditionConfig::new(1234, "tf-test-abc");
        cfg.condition_type = Some(ConditionType::ApmAppMetric);
        cfg.entities = Some(vec![5678, 91011]);
        cfg.metric = Some("apdex".into());
        cfg.runbook_url = Some("https://foo.example.com".into());
        cfg.condition_scope = Some("application".into());
        cfg.term = vec![term(5, 0.75), term(10, 0.5)];
        cfg
    }

    fn nrql_condition() -> ConditionConfig {
        let mut cfg = ConditionConfig::new(1234, "tf-test-nrql-abc");
        cfg.nrql = vec![NrqlConfig {
            query: "SELECT count(*) from SyntheticCheck where monitorName = 'foo' and result != 'SUCCESS'"
                .into(),
            since_value: 3,
        }];
        cfg.runbook_url = Some("https://foo.example.com".into());
        cfg.term = vec![term(5, 0.75)];
        cfg
    }

    #[test]
    fn build_metric_condition() {
        let cond = build(&metric_condition()).unwrap();
        assert_eq!(cond.policy_id, 1234);
        assert!(cond.enabled);
        assert_eq!(cond.condition_type, Some(ConditionType::ApmAppMetric));
        assert_eq!(cond.entities, vec!["5678".to_string(), "91011".to_string()]);
        assert_eq!(cond.metric, "apdex");
        assert_eq!(cond.condition_scope, "application");
        assert_eq!(cond.terms.len(), 2);
        assert_eq!(cond.terms[1].duration, 10);
        assert!(cond.nrql.is_empty());
    }

    #[test]
    fn build_nrql_condition() {
        let cond = build(&nrql_condition()).unwrap();
        assert!(cond.condition_type.is_none());
        assert!(cond.entities.is_empty());
        assert!(cond.metric.is_empty());
        assert_eq!(cond.nrql.len(), 1);
        assert_eq!(cond.nrql[0].since_value, 3);
        assert_eq!(cond.value_function, Some(ValueFunction::SingleValue));
    }

    #[test]
    fn build_rejects_mixed_shapes() {
        let mut cfg = nrql_condition();
        cfg.entities = Some(vec![1]);
        assert!(matches!(
            build(&cfg),
            Err(ConditionError::Shape(ShapeError::MetricFieldsOnNrql(_)))
        ));
    }

    #[test]
    fn build_rejects_empty_entities() {
        let mut cfg = metric_condition();
        cfg.entities = Some(vec![]);
        assert!(matches!(
            build(&cfg),
            Err(ConditionError::Shape(ShapeError::MissingMetricField("entities")))
        ));
    }

    #[test]
    fn build_rejects_missing_shape() {
        let mut cfg = metric_condition();
        cfg.metric = None;
        cfg.entities = None;
        cfg.condition_type = None;
        assert!(matches!(
            build(&cfg),
            Err(ConditionError::Shape(ShapeError::MissingMetricField(_)))
        ));
    }

    #[test]
    fn build_copies_user_defined_pair() {
        let mut cfg = metric_condition();
        cfg.metric = Some("user_defined".into());
        cfg.user_defined_metric = Some("Custom/Queue/Depth".into());
        cfg.user_defined_value_function = Some(UserDefinedValueFunction::Average);
        let cond = build(&cfg).unwrap();
        let ud = cond.user_defined.unwrap();
        assert_eq!(ud.metric, "Custom/Queue/Depth");
        assert_eq!(ud.value_function, UserDefinedValueFunction::Average);
    }

    #[test]
    fn read_recovers_policy_from_resource_id() {
        let mut cond = build(&metric_condition()).unwrap();
        cond.id = 77;
        cond.policy_id = 0;
        let cfg = read(&cond, "1234:77").unwrap();
        assert_eq!(cfg.policy_id, 1234);
        assert_eq!(cfg.entities, Some(vec![5678, 91011]));
    }

    #[test]
    fn read_rejects_bad_entity() {
        let mut cond = build(&metric_condition()).unwrap();
        cond.entities.push("app-1".into());
        assert!(matches!(
            read(&cond, "1234:77"),
            Err(ConditionError::InvalidEntity(e)) if e == "app-1"
        ));
    }

    #[test]
    fn read_rejects_malformed_resource_id() {
        let cond = build(&metric_condition()).unwrap();
        assert!(matches!(
            read(&cond, "77"),
            Err(ConditionError::Identifier(_))
        ));
    }

    #[test]
    fn failed_read_leaves_config_untouched() {
        let original = metric_condition();
        let mut cfg = original.clone();
        let mut cond = build(&nrql_condition()).unwrap();
        cond.entities = vec!["x".into()];
        assert!(read_into(&cond, &mut cfg, "1234:1").is_err());
        assert_eq!(cfg, original);
    }

    #[test]
    fn metric_round_trip() {
        let cfg = metric_condition();
        let cond = build(&cfg).unwrap();
        let back = read(&cond, "1234:1").unwrap();
        assert_eq!(back, cfg);
        assert_eq!(build(&back).unwrap(), cond);
    }

    #[test]
    fn nrql_round_trip() {
        let mut cfg = nrql_condition();
        cfg.value_function = ValueFunction::Sum;
        let cond = build(&cfg).unwrap();
        let back = read(&cond, "1234:1").unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn round_trip_preserves_term_order() {
        let mut cfg = metric_condition();
        cfg.term = vec![term(60, 3.0), term(5, 1.0), term(30, 2.0)];
        let back = read(&build(&cfg).unwrap(), "1234:1").unwrap();
        let durations: Vec<u32> = back.term.iter().map(|t| t.duration).collect();
        assert_eq!(durations, vec![60, 5, 30]);
    }
}

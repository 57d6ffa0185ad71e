use crate::catalog::{self, METRIC_DURATIONS, NRQL_DURATIONS, SINCE_VALUES};
use crate::error::{ConditionError, ShapeError, ValidationError};
use crate::schema::{ConditionConfig, TermConfig};

/// Which of the two mutually exclusive condition bodies a document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Metric,
    Nrql,
}

impl Shape {
    pub fn of(config: &ConditionConfig) -> Self {
        if config.is_nrql() {
            Self::Nrql
        } else {
            Self::Metric
        }
    }

    pub fn allowed_durations(self) -> &'static [u32] {
        match self {
            Self::Metric => METRIC_DURATIONS,
            Self::Nrql => NRQL_DURATIONS,
        }
    }
}

/// Decides the document's shape and rejects mixed or incomplete bodies.
pub fn check_shape(config: &ConditionConfig) -> Result<Shape, ShapeError> {
    match Shape::of(config) {
        Shape::Nrql => {
            let mut present = Vec::new();
            if config.condition_type.is_some() {
                present.push("type");
            }
            if config.entities.is_some() {
                present.push("entities");
            }
            if config.metric.is_some() {
                present.push("metric");
            }
            if present.is_empty() {
                Ok(Shape::Nrql)
            } else {
                Err(ShapeError::MetricFieldsOnNrql(present))
            }
        }
        Shape::Metric => {
            if config.metric.is_none() {
                return Err(ShapeError::MissingMetricField("metric"));
            }
            match &config.entities {
                Some(entities) if !entities.is_empty() => {}
                _ => return Err(ShapeError::MissingMetricField("entities")),
            }
            if config.condition_type.is_none() {
                return Err(ShapeError::MissingMetricField("type"));
            }
            Ok(Shape::Metric)
        }
    }
}

pub fn validate_duration(shape: Shape, duration: u32) -> Result<(), String> {
    let allowed = shape.allowed_durations();
    if allowed.contains(&duration) {
        Ok(())
    } else {
        Err(format!("{duration} is not one of {}", join(allowed)))
    }
}

/// Checks every constraint of the document and returns its shape.
pub fn validate(config: &ConditionConfig) -> Result<Shape, ConditionError> {
    if config.name.trim().is_empty() {
        return Err(ValidationError::new("name", "must not be empty").into());
    }
    if config.term.is_empty() {
        return Err(ValidationError::new("term", "at least one term is required").into());
    }
    if let Some(entities) = &config.entities {
        if entities.is_empty() {
            return Err(ValidationError::new("entities", "must contain at least one entity").into());
        }
    }
    if config.nrql.len() > 1 {
        return Err(ValidationError::new("nrql", "at most one nrql block is allowed").into());
    }

    let shape = check_shape(config)?;

    for (i, term) in config.term.iter().enumerate() {
        validate_term(shape, i, term)?;
    }

    if let (Some(condition_type), Some(metric)) = (config.condition_type, &config.metric) {
        if !catalog::is_known_metric(condition_type, metric) {
            return Err(ValidationError::new(
                "metric",
                format!(
                    "{metric:?} is not a {condition_type} metric, expected one of {}",
                    catalog::metrics_for(condition_type).join(", ")
                ),
            )
            .into());
        }
    }

    for (i, nrql) in config.nrql.iter().enumerate() {
        if nrql.query.trim().is_empty() {
            return Err(ValidationError::new(format!("nrql[{i}].query"), "must not be empty").into());
        }
        if !SINCE_VALUES.contains(&nrql.since_value) {
            return Err(ValidationError::new(
                format!("nrql[{i}].since_value"),
                format!("{} is not one of {}", nrql.since_value, join(SINCE_VALUES)),
            )
            .into());
        }
    }

    match (&config.user_defined_metric, &config.user_defined_value_function) {
        (Some(_), None) => {
            return Err(ValidationError::new(
                "user_defined_value_function",
                "required when user_defined_metric is set",
            )
            .into())
        }
        (None, Some(_)) => {
            return Err(ValidationError::new(
                "user_defined_metric",
                "required when user_defined_value_function is set",
            )
            .into())
        }
        _ => {}
    }

    Ok(shape)
}

fn validate_term(shape: Shape, index: usize, term: &TermConfig) -> Result<(), ValidationError> {
    validate_duration(shape, term.duration)
        .map_err(|msg| ValidationError::new(format!("term[{index}].duration"), msg))?;

    if !term.threshold.is_finite() || term.threshold < 0.0 {
        return Err(ValidationError::new(
            format!("term[{index}].threshold"),
            format!("{} must be a number >= 0", term.threshold),
        ));
    }
    Ok(())
}

fn join(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

use std::path::Path;

use crate::error::ConditionError;
use crate::schema::ConditionConfig;
use crate::validate::validate;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("parse: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConditionError),
}

/// Loads a `.json` file as JSON and anything else as YAML.
pub fn load_from_file(path: &Path) -> Result<ConditionConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let cfg = if is_json {
        let cfg: ConditionConfig = serde_json::from_str(&contents)?;
        validate(&cfg)?;
        cfg
    } else {
        load_from_str(&contents)?
    };
    tracing::debug!(path = %path.display(), name = %cfg.name, "condition document loaded");
    Ok(cfg)
}

/// Parses a YAML (or JSON, as a YAML subset) condition document and
/// validates it.
pub fn load_from_str(source: &str) -> Result<ConditionConfig, LoadError> {
    let cfg: ConditionConfig = serde_yaml::from_str(source)?;
    validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;

    const METRIC_YAML: &str = r#"
policy_id: 1234
name: tf-test-abc
type: apm_app_metric
entities: [5678]
metric: apdex
term:
  - duration: 5
    operator: below
    threshold: 0.75
    time_function: all
"#;

    #[test]
    fn valid_yaml_document() {
        let cfg = load_from_str(METRIC_YAML).unwrap();
        assert_eq!(cfg.name, "tf-test-abc");
        assert_eq!(cfg.term[0].threshold, 0.75);
    }

    #[test]
    fn json_document_accepted() {
        let json = r#"{"policy_id": 1, "name": "n", "nrql": [{"query": "SELECT 1", "since_value": 2}],
            "term": [{"duration": 1, "threshold": 0, "time_function": "any"}]}"#;
        let cfg = load_from_str(json).unwrap();
        assert!(cfg.is_nrql());
    }

    #[test]
    fn invalid_enum_is_parse_error() {
        let yaml = METRIC_YAML.replace("operator: below", "operator: sideways");
        assert!(matches!(load_from_str(&yaml), Err(LoadError::Parse(_))));
    }

    #[test]
    fn invalid_duration_is_rejected() {
        let yaml = METRIC_YAML.replace("duration: 5", "duration: 1");
        let err = load_from_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("term[0].duration"));
    }

    #[test]
    fn mixed_shape_is_rejected() {
        let yaml = format!("{METRIC_YAML}nrql:\n  - query: SELECT 1\n    since_value: 1\n");
        assert!(matches!(
            load_from_str(&yaml),
            Err(LoadError::Invalid(ConditionError::Shape(ShapeError::MetricFieldsOnNrql(_))))
        ));
    }

    #[test]
    fn load_from_file_works() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("condition.yml");
        std::fs::write(&path, METRIC_YAML).unwrap();
        let cfg = load_from_file(&path).unwrap();
        assert_eq!(cfg.policy_id, 1234);
    }

    #[test]
    fn json_file_parsed_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("condition.json");
        std::fs::write(&path, r#"{"policy_id": 9, "name": "n", "nrql": [{"query": "SELECT 1", "since_value": 5}],
            "term": [{"duration": 2, "threshold": 1.5, "time_function": "all"}]}"#)
            .unwrap();
        let cfg = load_from_file(&path).unwrap();
        assert_eq!(cfg.nrql[0].since_value, 5);

        std::fs::write(&path, "policy_id: 9\n").unwrap();
        assert!(matches!(load_from_file(&path), Err(LoadError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_from_file(Path::new("/nonexistent/condition.yml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}

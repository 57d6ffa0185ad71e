//! Composite resource identifiers.
//!
//! The alerting API numbers conditions per policy, so a condition id alone
//! does not address anything. Every resource handle is the `:`-joined list of
//! its owning ids, e.g. `"1234:5678"` for policy 1234, condition 5678.

use std::fmt;
use std::str::FromStr;

pub const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier {id:?} has {found} parts, expected {expected}")]
    PartCount {
        id: String,
        expected: usize,
        found: usize,
    },
    #[error("identifier {id:?} part {index} ({part:?}) is not an integer")]
    NotInteger {
        id: String,
        index: usize,
        part: String,
    },
}

pub fn serialize_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

pub fn parse_ids(id: &str, expected: usize) -> Result<Vec<i64>, IdError> {
    let parts: Vec<&str> = id.split(SEPARATOR).collect();
    if parts.len() != expected {
        return Err(IdError::PartCount {
            id: id.to_string(),
            expected,
            found: parts.len(),
        });
    }

    parts
        .iter()
        .enumerate()
        .map(|(index, part)| {
            part.parse::<i64>().map_err(|_| IdError::NotInteger {
                id: id.to_string(),
                index,
                part: part.to_string(),
            })
        })
        .collect()
}

/// The `(policy id, condition id)` pair addressing one alert condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionId {
    pub policy_id: i64,
    pub condition_id: i64,
}

impl ConditionId {
    pub fn new(policy_id: i64, condition_id: i64) -> Self {
        Self {
            policy_id,
            condition_id,
        }
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_ids(&[self.policy_id, self.condition_id]))
    }
}

impl FromStr for ConditionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_ids(s, 2)?.as_slice() {
            [policy_id, condition_id] => Ok(Self::new(*policy_id, *condition_id)),
            other => Err(IdError::PartCount {
                id: s.to_string(),
                expected: 2,
                found: other.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_joins_with_colon() {
        assert_eq!(serialize_ids(&[1234, 5678]), "1234:5678");
        assert_eq!(serialize_ids(&[7]), "7");
    }

    #[test]
    fn parse_recovers_parts() {
        assert_eq!(parse_ids("1234:5678", 2).unwrap(), vec![1234, 5678]);
    }

    #[test]
    fn round_trip_pairs() {
        for (p, c) in [(0, 0), (1, 2), (987_654, 123), (i64::MAX, 42)] {
            let token = serialize_ids(&[p, c]);
            assert_eq!(parse_ids(&token, 2).unwrap(), vec![p, c]);
        }
    }

    #[test]
    fn too_few_parts_rejected() {
        let err = parse_ids("1234", 2).unwrap_err();
        assert_eq!(
            err,
            IdError::PartCount {
                id: "1234".into(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn too_many_parts_rejected() {
        assert!(matches!(
            parse_ids("1:2:3", 2),
            Err(IdError::PartCount { found: 3, .. })
        ));
    }

    #[test]
    fn non_integer_part_rejected() {
        let err = parse_ids("1234:abc", 2).unwrap_err();
        assert!(matches!(err, IdError::NotInteger { index: 1, .. }));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn empty_token_rejected() {
        assert!(parse_ids("", 2).is_err());
        assert!(parse_ids(":", 2).is_err());
    }

    #[test]
    fn condition_id_display_and_parse() {
        let id = ConditionId::new(10, 20);
        assert_eq!(id.to_string(), "10:20");
        assert_eq!("10:20".parse::<ConditionId>().unwrap(), id);
        assert!("10".parse::<ConditionId>().is_err());
    }
}

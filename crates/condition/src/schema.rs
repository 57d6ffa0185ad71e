use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed, snake_case string enumeration with its wire spelling.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(
                        "unknown {} {other:?}, expected one of {}",
                        stringify!($name),
                        Self::VALUES.join(", ")
                    )),
                }
            }
        }
    };
}

string_enum!(
    /// Metric condition family.
    ConditionType {
        ApmAppMetric => "apm_app_metric",
        ApmKtMetric => "apm_kt_metric",
        BrowserMetric => "browser_metric",
        MobileMetric => "mobile_metric",
        ServersMetric => "servers_metric",
    }
);

string_enum!(Operator {
    Above => "above",
    Below => "below",
    Equal => "equal",
});

string_enum!(Priority {
    Critical => "critical",
    Warning => "warning",
});

string_enum!(TimeFunction {
    All => "all",
    Any => "any",
});

string_enum!(
    /// `single_value` evaluates each query result; `sum` evaluates the sum
    /// of the results over the term duration.
    ValueFunction {
        SingleValue => "single_value",
        Sum => "sum",
    }
);

string_enum!(UserDefinedValueFunction {
    Average => "average",
    Min => "min",
    Max => "max",
    Total => "total",
    SampleSize => "sample_size",
});

impl Default for Operator {
    fn default() -> Self {
        Self::Equal
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Critical
    }
}

impl Default for ValueFunction {
    fn default() -> Self {
        Self::SingleValue
    }
}

/// Configuration document of one alert condition.
///
/// A condition is either metric-shaped (`type`, `entities`, `metric`) or
/// NRQL-shaped (a single `nrql` block); see [`crate::check_shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionConfig {
    pub policy_id: i64,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub condition_type: Option<ConditionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runbook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_scope: Option<String>,
    #[serde(default)]
    pub term: Vec<TermConfig>,
    #[serde(default)]
    pub value_function: ValueFunction,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nrql: Vec<NrqlConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_defined_metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_defined_value_function: Option<UserDefinedValueFunction>,
}

impl ConditionConfig {
    pub fn new(policy_id: i64, name: impl Into<String>) -> Self {
        Self {
            policy_id,
            name: name.into(),
            condition_type: None,
            entities: None,
            metric: None,
            runbook_url: None,
            condition_scope: None,
            term: Vec::new(),
            value_function: ValueFunction::default(),
            nrql: Vec::new(),
            user_defined_metric: None,
            user_defined_value_function: None,
        }
    }

    pub fn is_nrql(&self) -> bool {
        !self.nrql.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    pub duration: u32,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub priority: Priority,
    pub threshold: f64,
    pub time_function: TimeFunction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NrqlConfig {
    pub query: String,
    pub since_value: u32,
}

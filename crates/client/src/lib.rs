//! Client side of the alerting REST API.

mod api;
mod config;
mod http;

pub use api::{AlertsApi, ApiError};
pub use config::{ConfigError, ProviderConfig, API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL};
pub use http::HttpAlertsClient;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use alertcond_client::ProviderConfig;
use alertcond_condition::{load_from_file, ConditionConfig};
use alertcond_provider::AlertConditionResource;
use anyhow::{Context, Result};

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join("alertcond").join("provider.yml");
    }
    PathBuf::from("/etc/alertcond/provider.yml")
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Provider settings from `--config` (or the default path when it exists),
/// the environment, and finally `--api-url`.
pub fn load_config<F>(
    config_path: Option<&str>,
    api_url: Option<&str>,
    lookup: F,
) -> Result<ProviderConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let path = match config_path {
        Some(p) => Some(PathBuf::from(p)),
        None => Some(default_config_path()).filter(|p| p.exists()),
    };

    let contents = match &path {
        Some(p) => Some(
            std::fs::read_to_string(p)
                .with_context(|| format!("reading config from {}", p.display()))?,
        ),
        None => None,
    };

    let mut cfg = ProviderConfig::resolve(contents.as_deref(), lookup).with_context(|| match &path {
        Some(p) => format!("loading config from {}", p.display()),
        None => "loading config from environment".to_string(),
    })?;

    if let Some(url) = api_url {
        cfg.api_url = url.to_string();
        cfg.validate().context("invalid --api-url")?;
    }
    tracing::debug!(api_url = %cfg.api_url, "provider config resolved");
    Ok(cfg)
}

pub fn resource(config_path: Option<&str>, api_url: Option<&str>) -> Result<AlertConditionResource> {
    let cfg = load_config(config_path, api_url, env_lookup)?;
    let client = cfg.client().context("building API client")?;
    Ok(AlertConditionResource::new(Arc::new(client)))
}

pub fn load_document(path: &str) -> Result<ConditionConfig> {
    load_from_file(Path::new(path)).with_context(|| format!("loading condition from {path}"))
}

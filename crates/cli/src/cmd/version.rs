use crate::output::{banner, print_json, OutputMode};
use serde::Serialize;

use super::helpers;

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    resource: &'static str,
    api_url: Option<String>,
    arch: &'static str,
    os: &'static str,
}

pub fn execute(mode: OutputMode, config_path: Option<&str>, api_url: Option<&str>) {
    let configured = helpers::load_config(config_path, api_url, helpers::env_lookup)
        .ok()
        .map(|cfg| cfg.api_url);

    let info = VersionInfo {
        name: "alertcond",
        version: env!("CARGO_PKG_VERSION"),
        resource: alertcond_provider::RESOURCE_TYPE,
        api_url: configured,
        arch: std::env::consts::ARCH,
        os: std::env::consts::OS,
    };

    match mode {
        OutputMode::Json => {
            let _ = print_json(&info);
        }
        OutputMode::Human => banner::print_version_block(
            info.version,
            info.api_url.as_deref().unwrap_or("not configured"),
        ),
    }
}

use alertcond_common::ConditionId;
use alertcond_condition::ConditionConfig;
use alertcond_provider::{Resource, ResourceData, ResourceError};
use anyhow::{Context, Result};
use clap::Args;
use indicatif::ProgressBar;

use super::document::FileArgs;
use super::helpers;
use crate::output::{confirm, condition_table, print_json, print_yaml, spinner, theme, OutputMode};

#[derive(Args)]
pub struct IdArgs {
    #[arg(help = "Condition id, <policy_id>:<condition_id>")]
    id: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(help = "Condition id, <policy_id>:<condition_id>")]
    id: String,
    #[arg(help = "Condition document (YAML or JSON)")]
    file: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(help = "Condition id, <policy_id>:<condition_id>")]
    id: String,
    #[arg(long, help = "Skip confirmation prompt")]
    yes: bool,
}

/// Settings shared by every command that reaches the API.
pub struct Remote<'a> {
    pub mode: OutputMode,
    pub config_path: Option<&'a str>,
    pub api_url: Option<&'a str>,
}

fn finish<T>(sp: Option<ProgressBar>, result: &Result<T, ResourceError>, ok: &str, failed: &str) {
    if let Some(sp) = sp {
        match result {
            Ok(_) => spinner::finish_ok(&sp, ok),
            Err(_) => spinner::finish_err(&sp, failed),
        }
    }
}

fn print_condition(id: &str, config: &ConditionConfig) {
    theme::print_header(&config.name);
    theme::print_kv("ID", id);
    theme::print_kv("Policy", &config.policy_id.to_string());
    match (&config.condition_type, config.nrql.first()) {
        (_, Some(nrql)) => {
            theme::print_kv("Query", &nrql.query);
            theme::print_kv("Since", &format!("{}m", nrql.since_value));
        }
        (Some(kind), None) => {
            theme::print_kv("Type", kind.as_str());
            theme::print_kv("Metric", config.metric.as_deref().unwrap_or("-"));
            let entities = config
                .entities
                .iter()
                .flatten()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            theme::print_kv("Entities", &entities);
        }
        (None, None) => {}
    }
    theme::print_kv("Value function", config.value_function.as_str());
    if let Some(url) = &config.runbook_url {
        theme::print_kv("Runbook", url);
    }
    println!();
    println!("{}", condition_table(config));
}

pub async fn create(args: FileArgs, remote: Remote<'_>) -> Result<()> {
    let config = helpers::load_document(&args.file)?;
    let resource = helpers::resource(remote.config_path, remote.api_url)?;
    let mut data = ResourceData::new(config);

    let sp = spinner::for_mode(remote.mode, "Creating condition...");
    let result = resource.create(&mut data).await;
    finish(sp, &result, "Condition created", "Create failed");
    result.context("creating condition")?;

    let id = data.id().unwrap_or_default();
    match remote.mode {
        OutputMode::Json => print_json(&serde_json::json!({"id": id, "name": data.config.name}))?,
        OutputMode::Human => theme::print_kv("ID", id),
    }
    Ok(())
}

pub async fn get(args: IdArgs, remote: Remote<'_>) -> Result<()> {
    let resource = helpers::resource(remote.config_path, remote.api_url)?;

    let sp = spinner::for_mode(remote.mode, "Fetching condition...");
    let result = resource.import(&args.id).await;
    if let Some(sp) = sp {
        spinner::finish_clear(&sp);
    }
    let data = result.with_context(|| format!("fetching condition {}", args.id))?;

    match remote.mode {
        OutputMode::Json => print_json(&serde_json::json!({"id": args.id, "condition": data.config}))?,
        OutputMode::Human => print_condition(&args.id, &data.config),
    }
    Ok(())
}

pub async fn update(args: UpdateArgs, remote: Remote<'_>) -> Result<()> {
    let config = helpers::load_document(&args.file)?;
    let resource = helpers::resource(remote.config_path, remote.api_url)?;
    let mut data = ResourceData::with_id(args.id.clone(), config);

    let sp = spinner::for_mode(remote.mode, "Updating condition...");
    let result = resource.update(&mut data).await;
    finish(
        sp,
        &result,
        &format!("Condition {} updated", args.id),
        "Update failed",
    );
    result.with_context(|| format!("updating condition {}", args.id))?;

    if remote.mode == OutputMode::Json {
        print_json(&serde_json::json!({"id": args.id, "condition": data.config}))?;
    }
    Ok(())
}

pub async fn delete(args: DeleteArgs, remote: Remote<'_>) -> Result<()> {
    let id: ConditionId = args.id.parse().context("parsing condition id")?;

    if remote.mode == OutputMode::Human && !args.yes {
        let msg = format!("Delete condition '{}'?", args.id);
        if !confirm::confirm_action(&msg) {
            theme::print_dim("Cancelled.");
            return Ok(());
        }
    }

    let resource = helpers::resource(remote.config_path, remote.api_url)?;
    let mut data = ResourceData::with_id(args.id.clone(), ConditionConfig::new(id.policy_id, ""));

    let sp = spinner::for_mode(remote.mode, "Deleting condition...");
    let result = resource.delete(&mut data).await;
    finish(
        sp,
        &result,
        &format!("Condition '{}' deleted", args.id),
        "Delete failed",
    );
    result.with_context(|| format!("deleting condition {}", args.id))?;

    if remote.mode == OutputMode::Json {
        print_json(&serde_json::json!({"deleted": true, "id": args.id}))?;
    }
    Ok(())
}

/// Prints the remote condition as a document that `create`/`update` accept.
pub async fn import(args: IdArgs, remote: Remote<'_>) -> Result<()> {
    let resource = helpers::resource(remote.config_path, remote.api_url)?;
    let data = resource
        .import(&args.id)
        .await
        .with_context(|| format!("importing condition {}", args.id))?;

    match remote.mode {
        OutputMode::Json => print_json(&data.config)?,
        OutputMode::Human => print_yaml(&data.config)?,
    }
    Ok(())
}

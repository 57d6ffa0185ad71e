//! Offline commands: nothing here talks to the alerting API.

use alertcond_condition::model::ConditionEnvelope;
use alertcond_condition::{build, validate, Shape};
use alertcond_provider::{condition_schema, AttributeType, ValueType};
use anyhow::{Context, Result};
use clap::Args;

use super::helpers;
use crate::output::{build_table, condition_table, print_json, print_success, theme, OutputMode};

#[derive(Args)]
pub struct FileArgs {
    #[arg(help = "Condition document (YAML or JSON)")]
    pub file: String,
}

pub(crate) fn shape_name(shape: Shape) -> &'static str {
    match shape {
        Shape::Metric => "metric",
        Shape::Nrql => "nrql",
    }
}

pub fn validate_file(args: FileArgs, mode: OutputMode) -> Result<()> {
    let config = helpers::load_document(&args.file)?;
    let shape = validate(&config)?;

    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "valid": true,
            "file": args.file,
            "name": config.name,
            "shape": shape_name(shape),
        }))?,
        OutputMode::Human => {
            print_success(&format!(
                "{} is a valid {} condition",
                args.file,
                shape_name(shape)
            ));
        }
    }
    Ok(())
}

pub fn plan(args: FileArgs, mode: OutputMode) -> Result<()> {
    let config = helpers::load_document(&args.file)?;
    let shape = validate(&config)?;
    let body = ConditionEnvelope {
        condition: build(&config).context("building request body")?,
    };
    let endpoint = format!("POST /alerts_conditions/policies/{}.json", config.policy_id);

    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "endpoint": endpoint,
            "body": body,
        }))?,
        OutputMode::Human => {
            theme::print_header("Plan");
            theme::print_kv("Name", &config.name);
            theme::print_kv("Policy", &config.policy_id.to_string());
            theme::print_kv("Shape", shape_name(shape));
            theme::print_kv("Endpoint", &endpoint);
            println!("{}", condition_table(&config));
            theme::print_section("Request body");
            print_json(&body)?;
        }
    }
    Ok(())
}

fn value_label(v: ValueType) -> &'static str {
    match v {
        ValueType::Int => "int",
        ValueType::Float => "float",
        ValueType::String => "string",
    }
}

fn type_label(kind: &AttributeType) -> String {
    match kind {
        AttributeType::Scalar(v) => value_label(*v).to_string(),
        AttributeType::List(v) => format!("list({})", value_label(*v)),
        AttributeType::Block(_) => "block".to_string(),
    }
}

pub fn schema(mode: OutputMode) -> Result<()> {
    let schema = condition_schema();

    if mode == OutputMode::Json {
        return print_json(&schema);
    }

    theme::print_header(alertcond_provider::RESOURCE_TYPE);
    let mut table = build_table(&["Attribute", "Type", "Required", "Default", "Allowed"]);
    let mut rows = Vec::new();
    for attr in &schema.attributes {
        rows.push((attr.name.to_string(), attr));
        if let AttributeType::Block(nested) = &attr.kind {
            rows.extend(nested.iter().map(|n| (format!("{}.{}", attr.name, n.name), n)));
        }
    }
    for (name, attr) in rows {
        let required = match (attr.required, attr.force_new) {
            (true, true) => "yes (replaces)",
            (true, false) => "yes",
            (false, _) => "",
        };
        table.add_row(vec![
            name,
            type_label(&attr.kind),
            required.to_string(),
            attr.default.unwrap_or("").to_string(),
            attr.allowed.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}

//! `alertcond`: validate, plan and apply alert-condition documents against
//! the alerting REST API.

mod cmd;
mod output;

use anyhow::Result;
use clap::{ArgAction, Parser};
use cmd::Commands;
use output::OutputMode;

#[derive(Parser)]
#[command(name = "alertcond", version, about = "Manage alert conditions as configuration")]
pub struct Opts {
    #[clap(subcommand)]
    cmd: Commands,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    /// Alerting API base URL; wins over the config file and environment.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Provider config file (defaults to the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Raise log verbosity on stderr; repeat for more (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,
}

impl Opts {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    /// Fallback filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();
    alertcond_common::logging::init(opts.log_filter(), opts.log_json);
    cmd::run(opts).await
}

mod condition;
mod document;
pub(crate) mod helpers;
mod version;

use anyhow::Result;
use clap::Subcommand;

use condition::Remote;

#[derive(Subcommand)]
pub enum Commands {
    /// Check a condition document without contacting the API.
    Validate(document::FileArgs),
    /// Show the request a document would produce.
    Plan(document::FileArgs),
    /// Describe the condition resource's attributes.
    Schema,
    Create(document::FileArgs),
    Get(condition::IdArgs),
    Update(condition::UpdateArgs),
    Delete(condition::DeleteArgs),
    /// Print an existing condition as a configuration document.
    Import(condition::IdArgs),
    Version,
}

pub async fn run(opts: crate::Opts) -> Result<()> {
    let mode = opts.output_mode();
    let remote = Remote {
        mode,
        config_path: opts.config.as_deref(),
        api_url: opts.api_url.as_deref(),
    };

    match opts.cmd {
        Commands::Validate(args) => document::validate_file(args, mode),
        Commands::Plan(args) => document::plan(args, mode),
        Commands::Schema => document::schema(mode),
        Commands::Create(args) => condition::create(args, remote).await,
        Commands::Get(args) => condition::get(args, remote).await,
        Commands::Update(args) => condition::update(args, remote).await,
        Commands::Delete(args) => condition::delete(args, remote).await,
        Commands::Import(args) => condition::import(args, remote).await,
        Commands::Version => {
            version::execute(mode, remote.config_path, remote.api_url);
            Ok(())
        }
    }
}

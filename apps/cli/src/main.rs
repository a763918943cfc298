mod commands;
mod logging;
mod settings;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use commands::{MetaArgs, SearchArgs};
use esorm_client::SearchClient;
use esorm_query::SearchService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "esorm")]
#[command(about = "Query search indices and generate document types", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (TOML). Defaults to ./esorm.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log dispatched requests
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a typed document struct from an index mapping
    Meta {
        index: String,

        /// Struct name (derived from the index name by default)
        #[arg(long)]
        name: Option<String>,

        /// Field holding a list of values (repeatable)
        #[arg(long = "array", value_name = "FIELD")]
        array_fields: Vec<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a search and print the matching documents or buckets
    Search(SearchCommand),

    /// Count documents matching the filters
    Count {
        index: String,

        #[arg(long = "where", value_name = "FIELD=VALUE")]
        filters: Vec<String>,
    },

    /// Fetch documents by id
    Find {
        index: String,

        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args)]
struct SearchCommand {
    index: String,

    /// Equality filter (repeatable)
    #[arg(long = "where", value_name = "FIELD=VALUE")]
    filters: Vec<String>,

    /// Field to return (repeatable)
    #[arg(long, value_name = "FIELD")]
    select: Vec<String>,

    #[arg(long)]
    limit: Option<usize>,

    #[arg(long)]
    offset: Option<usize>,

    /// Sort key as FIELD or FIELD:asc|desc (repeatable)
    #[arg(long, value_name = "FIELD[:DIR]")]
    sort: Vec<String>,

    /// Collapse hits on this field
    #[arg(long, value_name = "FIELD")]
    group_by: Option<String>,

    /// Inner hits kept per collapsed group
    #[arg(long, default_value_t = 1)]
    group_size: usize,

    /// Print the compiled request instead of sending it
    #[arg(long)]
    dry_run: bool,
}

impl From<SearchCommand> for SearchArgs {
    fn from(command: SearchCommand) -> Self {
        Self {
            index: command.index,
            filters: command.filters,
            select: command.select,
            limit: command.limit,
            offset: command.offset,
            sort: command.sort,
            group_by: command.group_by,
            group_size: command.group_size,
            dry_run: command.dry_run,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.json_logs)?;

    let client_config = settings::load_client_config(cli.config.as_deref())?;
    tracing::debug!(hosts = ?client_config.hosts, "loaded client settings");
    let client = SearchClient::new(client_config).context("creating search client")?;

    match cli.command {
        Commands::Meta {
            index,
            name,
            array_fields,
            output,
        } => {
            commands::meta(
                &client,
                MetaArgs {
                    index,
                    type_name: name,
                    array_fields,
                    output,
                },
            )
            .await
        }
        Commands::Search(search) => commands::search(service(client), search.into()).await,
        Commands::Count { index, filters } => {
            commands::count(service(client), &index, &filters).await
        }
        Commands::Find { index, ids } => commands::find(service(client), &index, &ids).await,
    }
}

fn service(client: SearchClient) -> Arc<dyn SearchService> {
    Arc::new(client)
}

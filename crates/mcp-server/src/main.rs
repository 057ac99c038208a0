//! Hub MCP Server
//!
//! Serves a cached view of a large upstream GraphQL schema to AI agents via MCP, plus guarded
//! query and mutation execution.
//!
//! ## Tools
//!
//! - `capabilities` - Server version, tool list and default limits (best first call)
//! - `explore_schema` - Type details or filtered type listing with example queries
//! - `find_entity_path` - Relationship paths between two entity types with query templates
//! - `validate_query` - Offline structural validation with "did you mean" suggestions
//! - `graphql_query` - Validated query execution with retries
//! - `graphql_mutate` - Mutation execution; destructive ones require `confirm=true`
//! - `refresh_schema` - Reload the schema and rebuild the relationship graph
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "hub": {
//!       "command": "hub-mcp",
//!       "env": { "HUB_MCP_URL": "https://hub.example.com", "HUB_MCP_TOKEN": "..." }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use hub_client::GraphQLExecutor;
use hub_schema_cache::{IntrospectionSource, SchemaService, SchemaStore};
use rmcp::ServiceExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod refresh;
mod tools;

use config::HubConfig;
use refresh::{spawn_refresh_task, RefreshSchedule};
use tools::catalog;
use tools::HubService;

#[derive(Parser, Debug)]
#[command(name = "hub-mcp", version, about = "GraphQL schema hub MCP server (stdio)")]
struct Cli {
    /// TOML configuration file (defaults to $HUB_MCP_CONFIG)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print tool inventory as JSON and exit
    #[arg(long)]
    print_tools: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_tools {
        println!("{}", catalog::tool_inventory_json(env!("CARGO_PKG_VERSION")));
        return Ok(());
    }

    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = HubConfig::load(cli.config.as_deref())?;
    if config.upstream.url.trim().is_empty() {
        log::warn!("No upstream URL configured (HUB_MCP_URL); schema tools will fail until set");
    }

    let executor = Arc::new(
        GraphQLExecutor::new(config.client_config()).context("failed to build GraphQL client")?,
    );
    let source: Arc<dyn IntrospectionSource> = executor.clone();
    let store = Arc::new(SchemaStore::new(source, config.store_config()));

    let schedule = RefreshSchedule {
        interval: (config.refresh.interval_secs > 0)
            .then(|| Duration::from_secs(config.refresh.interval_secs)),
        warmup_delay: config
            .refresh
            .warmup
            .then(|| Duration::from_secs(config.refresh.warmup_delay_secs)),
    };
    let refresh_task = spawn_refresh_task(Arc::clone(&store), schedule);

    log::info!("Starting hub MCP server");

    let service = HubService::new(SchemaService::new(store), executor);
    let server = service.serve(rmcp::transport::stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;
    refresh_task.abort();

    log::info!("Hub MCP server stopped");
    Ok(())
}

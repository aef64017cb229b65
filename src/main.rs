use anyhow::Context as _;
use clap::Parser;
use resource_discovery::cli::{Cli, Commands};
use resource_discovery::config::DiscoveryConfig;
use resource_discovery::discovery::{DifficultyRange, DiscoveryEngine};
use resource_discovery::format::format_discovery_result;
use resource_discovery::resource::{ConceptArea, Difficulty, ResourceCategory};
use resource_discovery::server::DiscoveryServer;
use resource_discovery::store::ResourceStore;
use resource_discovery::{catalog, logging};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stderr only: stdout carries the MCP protocol
    logging::init(cli.json_logs);

    let config = DiscoveryConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    let store = Arc::new(ResourceStore::new());
    match cli.catalog.as_ref().or(config.discovery.catalog.as_ref()) {
        Some(path) => {
            catalog::load_into(&store, path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
        }
        None => tracing::warn!("No catalog configured, starting with an empty corpus"),
    }

    let engine = Arc::new(DiscoveryEngine::new(store, &config)?);
    engine.refresh_statistics();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(engine).await,
        Commands::Query {
            query,
            mode,
            concept,
            category,
            min_difficulty,
            max_difficulty,
            limit,
            explain,
        } => {
            let result = if let Some(concept) = concept {
                let concept: ConceptArea = concept.parse()?;
                let min = min_difficulty.map(|d| d.parse::<Difficulty>()).transpose()?;
                let max = max_difficulty.map(|d| d.parse::<Difficulty>()).transpose()?;
                engine.discover_by_concept(concept, DifficultyRange::new(min, max)?, limit)
            } else if let Some(category) = category {
                let category: ResourceCategory = category.parse()?;
                engine.discover_by_category(category, limit)
            } else {
                engine.discover_with_mode(&query, mode.map(Into::into), limit)
            };
            print!("{}", format_discovery_result(&result, explain));
            Ok(())
        }
    }
}

async fn serve(engine: Arc<DiscoveryEngine>) -> anyhow::Result<()> {
    tracing::info!(
        "Starting resource-discovery MCP server with {} resources",
        engine.store().len()
    );

    let server = DiscoveryServer::new(engine);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

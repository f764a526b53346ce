//! supply CLI: load the supply-chain graph and ask it questions. Config from env and CLI flags.

use anyhow::{Context, Result};
use clap::Parser;
use supply_agent::{Answerer, SupplyChainAssistant};
use supply_cli::{run_chat, Cli, Commands};
use supply_core::{init_tracing, AppConfig};
use supply_ingest::Ingestor;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    cli.apply(&mut config);
    config.validate()?;

    init_tracing(config.log_file.as_deref())?;

    let assistant = SupplyChainAssistant::connect(&config)
        .await
        .context("Connect to Neo4j (check NEO4J_URI, NEO4J_USERNAME, NEO4J_PASSWORD)")?;

    match cli.command {
        Commands::Ingest => ingest(&assistant, &config).await,
        Commands::Ask {
            question,
            skip_ingest,
        } => {
            if !skip_ingest {
                ingest(&assistant, &config).await?;
            }
            println!("{}", assistant.answer(&question).await);
            Ok(())
        }
        Commands::Chat { skip_ingest } => {
            if !skip_ingest {
                ingest(&assistant, &config).await?;
            }
            let stdin = BufReader::new(tokio::io::stdin());
            let history = run_chat(&assistant, stdin, tokio::io::stdout()).await?;
            info!(turns = history.messages().len() / 2, "chat ended");
            Ok(())
        }
    }
}

async fn ingest(assistant: &SupplyChainAssistant, config: &AppConfig) -> Result<()> {
    let tools = assistant.tools();
    let ingestor = Ingestor::new(tools.store().clone(), tools.embedding().clone());
    let report = ingestor
        .run(
            &config.nodes_csv,
            &config.relationships_csv,
            &config.vector_index,
            config.embedding.embedding_dimensions,
        )
        .await
        .with_context(|| {
            format!(
                "Ingest {} and {}",
                config.nodes_csv, config.relationships_csv
            )
        })?;
    println!(
        "Nodes: {}, Relationships: {}, Embedded: {}",
        report.nodes, report.relationships, report.embedded
    );
    Ok(())
}

//! AlchemyLanguage CLI - run one analysis and print the result as JSON.
//!
//! Run `alchemy --help` for usage information.

use alchemy_language::config::SourceArgs;
use alchemy_language::{
    AlchemyLanguage, Args, Command, Config, ContentSource, SentimentParams, SentimentType,
    TextParams,
};
use anyhow::Result;
use console::style;
use serde::Serialize;
use serde_json::Value;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse_args();

    // Setup logging
    setup_logging(&args);

    // Load configuration
    let config = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    let client = AlchemyLanguage::new(config)?;

    info!(command = ?args.command, "Running analysis");

    match run(&client, args.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Execute one subcommand and return the decoded model as JSON.
async fn run(client: &AlchemyLanguage, command: Command) -> Result<Value> {
    match command {
        Command::Entities(source) => {
            to_json(client.get_entities(&into_source(source)?, Default::default()).await?)
        }
        Command::Sentiment { source, targets } => {
            let source = into_source(source)?;
            let (sentiment_type, params) = match targets {
                Some(targets) => (
                    SentimentType::Targeted,
                    SentimentParams::default().targets(targets),
                ),
                None => (SentimentType::Normal, SentimentParams::default()),
            };
            to_json(client.get_sentiment(&source, sentiment_type, params).await?)
        }
        Command::Keywords(source) => to_json(
            client
                .get_ranked_keywords(&into_source(source)?, Default::default())
                .await?,
        ),
        Command::Concepts(source) => to_json(
            client
                .get_ranked_concepts(&into_source(source)?, Default::default())
                .await?,
        ),
        Command::Relations(source) => {
            to_json(client.get_relations(&into_source(source)?, Default::default()).await?)
        }
        Command::Taxonomy(source) => to_json(
            client
                .get_ranked_taxonomy(&into_source(source)?, Default::default())
                .await?,
        ),
        Command::Authors(source) => to_json(client.get_authors(&into_source(source)?).await?),
        Command::Language(source) => {
            to_json(client.get_language(&into_source(source)?, Default::default()).await?)
        }
        Command::Text { source, mode } => to_json(
            client
                .get_text(&into_source(source)?, mode.into(), TextParams::default())
                .await?,
        ),
        Command::Microformats(source) => {
            to_json(client.get_microformat_data(&into_source(source)?).await?)
        }
        Command::Feeds(source) => to_json(client.get_feed_links(&into_source(source)?).await?),
    }
}

fn into_source(source: SourceArgs) -> Result<ContentSource> {
    Ok(source.into_source()?)
}

fn to_json<T: Serialize>(model: T) -> Result<Value> {
    Ok(serde_json::to_value(model)?)
}

fn setup_logging(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("alchemy_language={level},alchemy={level}"))
    });

    // Logs go to stderr so stdout stays valid JSON
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use prompt_refiner::config::{StorageTier, resolve_storage};
use prompt_refiner::llm::{AnthropicClient, Refiner};
use prompt_refiner::server::RefinerServer;
use prompt_refiner::storage::Storage;
use prompt_refiner::Config;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// `prompt-refiner` - stores prompts, generates styled rewrites, and
/// serves them to a host application over stdio JSON-RPC.
#[derive(Parser, Debug)]
#[command(name = "prompt-refiner")]
#[command(version)]
#[command(about = "Prompt refinement tool server over stdio.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the stdio request loop (the default)
    Serve,

    /// Print the resolved storage location and row counts
    Info,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout carries the protocol; all diagnostics go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::load_or_init()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Info => info(config).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    let target = resolve_storage(&config);
    let storage = Storage::open(target).await?;

    let client = AnthropicClient::new(config.api_key.as_deref(), config.model.as_deref());
    let refiner = Refiner::new(Arc::new(client));

    RefinerServer::new(storage, refiner).run().await?;
    Ok(())
}

async fn info(config: Config) -> Result<()> {
    let target = resolve_storage(&config);
    let storage = Storage::open(target).await?;
    let counts = storage.counts().await?;

    println!("config:    {}", config.config_path.display());
    match storage.path() {
        Some(path) => println!("database:  {} ({})", path.display(), storage.tier()),
        None => println!("database:  in-memory ({})", StorageTier::Memory),
    }
    println!("prompts:   {}", counts.prompts);
    println!("variants:  {}", counts.variants);
    println!("decisions: {}", counts.decisions);
    Ok(())
}

// SIGNCAST Main Entry Point
// Copyright (c) 2026 SIGNCAST

use signcast_core::config::ServiceConfig;
use signcast_core::server;
use signcast_core::state::ServiceState;
use signcast_core::translator::vocabulary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "signcast-core")]
#[command(about = "Text to sign-language video translation service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the translation web server
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },

    /// Translate text once and print the JSON result
    Translate {
        /// English text to translate
        #[arg(short, long)]
        text: String,
    },

    /// Build the vocabulary file from a dictionary-mapping JSON
    BuildVocab {
        /// Path to the dictionary-mapping JSON file
        #[arg(short, long)]
        mapping: PathBuf,

        /// Vocabulary file to write
        #[arg(short, long, default_value = "supported_words.txt")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Cli::parse();

    match args.command {
        Commands::Serve { port } => {
            let config = ServiceConfig::from_env();
            let state = Arc::new(ServiceState::new(config));
            info!(
                "[MAIN] Starting SIGNCAST: {} vocabulary entries, {} dataset tokens",
                state.vocabulary.len(),
                state.library.token_count()
            );
            server::start_server(port, state).await?;
        }
        Commands::Translate { text } => {
            let config = ServiceConfig::from_env();
            let state = ServiceState::new(config);
            let outcome = state.translate(&text).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::BuildVocab { mapping, output } => {
            let count = vocabulary::build_from_mapping(&mapping, &output)?;
            info!("[MAIN] Vocabulary built: {} entries -> {:?}", count, output);
        }
    }

    Ok(())
}

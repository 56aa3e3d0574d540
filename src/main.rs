// src/main.rs
// Emotion detector - web service and CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use emotion_detector::{
    EmotionClient,
    api::http_router,
    config::{CONFIG, EmotionConfig},
    state::AppState,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "emotion-detector")]
#[command(about = "Classify the emotions expressed in a piece of text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind (overrides EMOTION_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides EMOTION_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify a single text and print the result
    Classify {
        /// Text to analyze
        text: String,

        /// Include per-span mentions
        #[arg(long)]
        mentions: bool,
    },
}

async fn run_server(config: EmotionConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = http_router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Emotion detector listening on http://{}", bind_address);
    info!("Upstream: {} (timeout {}s)", config.api_url, config.timeout_secs);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_classify(config: &EmotionConfig, text: &str, mentions: bool) -> Result<()> {
    let client = EmotionClient::from_config(config)?;

    if mentions {
        let analysis = client.try_analyze(text).await?;
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        println!("{}", analysis.result.summary());
    } else {
        let result = client.try_classify(text).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        println!("{}", result.summary());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = (*CONFIG).clone();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await
        }
        Commands::Classify { text, mentions } => run_classify(&config, &text, mentions).await,
    }
}

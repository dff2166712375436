use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use interview_live::stream::{demo_script, run_scripted_feed};
use interview_live::{
    create_router, AppState, Config, CriteriaWeights, FileStore, InterviewDirectory, StreamClient,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "interview-live", about = "Live AI-interview session service")]
struct Cli {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/interview-live")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the session directory HTTP server
    Serve,
    /// Replay the scripted demo feed onto a session's live subject
    Simulate {
        /// Session to feed (a fresh id is generated when omitted)
        interview_id: Option<String>,

        /// Seconds between scripted events
        #[arg(long, default_value_t = 2.0)]
        delay_secs: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v0.1.0", cfg.service.name);

    match cli.command {
        Command::Serve => serve(cfg).await,
        Command::Simulate {
            interview_id,
            delay_secs,
        } => {
            let interview_id = interview_id
                .unwrap_or_else(|| format!("interview-{}", uuid::Uuid::new_v4()));
            simulate(cfg, &interview_id, delay_secs).await
        }
    }
}

async fn serve(cfg: Config) -> Result<()> {
    let settings = FileStore::new(&cfg.settings.store_path);
    let weights = CriteriaWeights::load(&settings);
    info!("Scoring criteria weights loaded (total {}%)", weights.total());

    let directory = Arc::new(InterviewDirectory::with_samples());
    let router = create_router(AppState::new(directory));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn simulate(cfg: Config, interview_id: &str, delay_secs: f64) -> Result<()> {
    let client = StreamClient::connect(&cfg.stream.nats_url).await?;

    // Give late subscribers a moment before the first event
    tokio::time::sleep(Duration::from_secs(1)).await;

    let script = demo_script();
    run_scripted_feed(
        &client,
        interview_id,
        &script,
        Duration::from_secs_f64(delay_secs),
    )
    .await?;

    client.close().await
}

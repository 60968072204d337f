//! Scanner Listener - replays listening sessions through the autoplay engine
use clap::{Parser, Subcommand};
use scanner_listener::{script, ListenerConfig, LoggingSurface};
use scanner_playback::Session;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scanner-listener")]
#[command(about = "Scanner Player call sequencing harness", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SCANNER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script
    Run {
        /// Script path (overrides session.script)
        script: Option<PathBuf>,

        /// Print the session summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load and validate configuration, then print it
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scanner_listener=info,scanner_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = ListenerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { script, json } => {
            if script.is_some() {
                config.session.script = script;
            }
            config.validate()?;
            run(config, json).await?;
        }
        Commands::CheckConfig => {
            config.validate()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn run(config: ListenerConfig, json: bool) -> anyhow::Result<()> {
    let Some(path) = config.session.script.as_deref() else {
        anyhow::bail!("No event script given (pass a path or set session.script)");
    };

    let events = script::load(path).await?;

    tracing::info!(
        "Starting session (autoplay: {}, keep-alive: {})",
        config.playback.autoplay_enabled,
        config.playback.background_keep_alive
    );

    let mut session = Session::new(config.playback.clone(), LoggingSurface::new());
    let summary = scanner_listener::run(&mut session, events, &config.session).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        tracing::info!(
            "Session finished: {} events ({} rejected), {} calls played, {} fillers, status {}",
            summary.events_handled,
            summary.events_rejected,
            summary.calls_played,
            session.surface().fillers_played(),
            summary.final_status
        );
    }

    Ok(())
}

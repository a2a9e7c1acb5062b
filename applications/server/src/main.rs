/// Jukebox Server - shared queue for one listening station
use clap::{Parser, Subcommand};
use jukebox_queue::wait_label;
use jukebox_server::{config::ServerConfig, state::AppState};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jukebox-server")]
#[command(about = "Shared jukebox queue server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the current queue
    Status,
    /// Remove every pending entry; the one playing is kept
    ClearQueue,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "jukebox_server=info,jukebox_queue=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Status => status(&config)?,
        Commands::ClearQueue => clear_queue(&config)?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Jukebox Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app_state = AppState::from_config(&config)?;
    tracing::info!(
        max_per_user = config.queue.max_per_user,
        track_duration_secs = config.queue.track_duration_secs,
        "Queue ready"
    );

    let app = jukebox_server::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn status(config: &ServerConfig) -> anyhow::Result<()> {
    let app_state = AppState::from_config(config)?;
    let now = app_state.clock.now();

    match app_state.queue.current_entry() {
        Some(entry) => println!(
            "Now playing: {} - {} (added by {})",
            entry.track.name,
            entry.track.artist_names(),
            entry.submitted_by
        ),
        None => println!("Nothing playing"),
    }

    let pending = app_state.queue.refresh_estimates();
    if pending.is_empty() {
        println!("Queue is empty");
        return Ok(());
    }

    println!("Up next:");
    for (position, entry) in pending.iter().enumerate() {
        let wait = entry
            .estimated_start_time
            .map(|start| wait_label(start, now))
            .unwrap_or_default();
        println!(
            "  {}. {} - {} (added by {}) {}",
            position + 1,
            entry.track.name,
            entry.track.artist_names(),
            entry.submitted_by,
            wait
        );
    }

    Ok(())
}

fn clear_queue(config: &ServerConfig) -> anyhow::Result<()> {
    let app_state = AppState::from_config(config)?;
    let pending = app_state.queue.len();

    app_state.queue.clear_all();

    println!("Cleared {pending} pending entries");
    Ok(())
}

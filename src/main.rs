//! plexvoice - Voice-command dispatcher for Plex
//!
//! Maps intent verbs (play, shuffle, resume, pause, ...) onto Plex's HTTP
//! control API, resolving the target device and media along the way.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use plexvoice::config::Config;
use plexvoice::dispatch::{dispatch, Action, ActionRequest};
use plexvoice::server::plex::PlexClient;
use plexvoice::server::MediaServer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action verb: play, shuffle, resume, pause, stop, skipNext,
    /// skipPrevious, stepForward, stepBack
    action: Option<String>,

    /// Media name to search for (play/shuffle)
    media: Option<String>,

    /// Restrict the media search to one type (show, movie, track, ...)
    #[arg(short = 't', long = "type")]
    media_type: Option<String>,

    /// Target playback device by name
    #[arg(short, long)]
    device: Option<String>,

    /// Shuffle the queue
    #[arg(short, long)]
    shuffle: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// List the playback devices the server knows about, then exit
    #[arg(long)]
    list_devices: bool,

    /// List the media servers associated with the account, then exit
    #[arg(long)]
    list_servers: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎬 plexvoice v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load()?;

    // One-time setup: without a configured server, ask the account which
    // servers exist and take the first. The config value is frozen before
    // any dispatch; requests never write back into it.
    if config.server_machine_id.is_empty() && !args.list_servers {
        let bootstrap = PlexClient::new(&config);
        warn!("No default server was set. Looking one up...");
        let servers = bootstrap.list_servers().await?;

        if servers.is_empty() {
            anyhow::bail!("No associated servers were found");
        }

        info!("Available servers:");
        for server in &servers {
            info!("  [{}] {}", server.name, server.machine_identifier);
        }
        info!(
            "Defaulting to {} [{}]. Set PLEX_SERVER_MACHINE_ID to override.",
            servers[0].name, servers[0].machine_identifier
        );
        config.server_machine_id = servers[0].machine_identifier.clone();
    }

    let config = config;
    let client = PlexClient::new(&config);

    if args.list_servers {
        for server in client.list_servers().await? {
            println!("[{}] {}", server.machine_identifier, server.name);
        }
        return Ok(());
    }

    if args.list_devices {
        for device in client.list_devices().await? {
            println!("[{}] {}", device.machine_identifier, device.name);
        }
        return Ok(());
    }

    let Some(action) = args.action else {
        anyhow::bail!(
            "No action given. Supported: {}",
            Action::all()
                .iter()
                .map(|a| a.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let request = ActionRequest {
        action,
        device_name: args.device,
        media_name: args.media,
        media_type: args.media_type,
        shuffle: args.shuffle,
    };

    match dispatch(&client, &config, &request).await {
        Ok(outcome) => {
            info!(
                "✅ {} dispatched to {} [{}]",
                request.action, outcome.device.name, outcome.device.machine_identifier
            );
            if let Some(media) = &outcome.media {
                info!("   playing: {} [{}]", media.title, media.media_type);
            }
            Ok(())
        }
        Err(e) => {
            error!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

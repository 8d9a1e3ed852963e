use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use checkers::core::logging::init_tracing;
use checkers::core::settings_persistence::{default_settings_path, load_settings};
use checkers::core::GameSettings;
use checkers::game::systems::{ai_game, host_game, join_game};
use checkers::networking::{RelayServer, DEFAULT_RELAY_PORT};
use checkers::ui::run_terminal;

#[derive(Parser, Debug)]
#[command(name = "checkers", version, about = "Checkers against the computer or over the network")]
struct Cli {
    /// Settings file (JSON); defaults to the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a relay that joins two players
    Relay {
        #[arg(long, default_value_t = DEFAULT_RELAY_PORT)]
        port: u16,
    },
    /// Play against the computer
    Ai {
        #[command(flatten)]
        overrides: SettingsOverrides,
    },
    /// Start a relay and play as its host
    Host {
        #[arg(long, default_value_t = DEFAULT_RELAY_PORT)]
        port: u16,
        #[command(flatten)]
        overrides: SettingsOverrides,
    },
    /// Join a game hosted elsewhere
    Join {
        /// Relay address, e.g. 192.168.1.20:5000
        addr: String,
        #[command(flatten)]
        overrides: SettingsOverrides,
    },
}

/// Command-line values that replace saved settings
#[derive(Args, Debug, Default)]
struct SettingsOverrides {
    /// AI search depth (1-8)
    #[arg(long)]
    difficulty: Option<u8>,

    /// Index into the clock table: 1, 2, 3, 5, 10, 30 minutes
    #[arg(long)]
    time_limit: Option<u8>,

    /// Play the light pieces (Dark moves first)
    #[arg(long)]
    light: bool,

    #[arg(long)]
    username: Option<String>,
}

impl SettingsOverrides {
    fn apply(self, mut settings: GameSettings) -> anyhow::Result<GameSettings> {
        if let Some(depth) = self.difficulty {
            settings.ai_difficulty = depth;
        }
        if let Some(index) = self.time_limit {
            settings.time_limit_index = index;
        }
        if self.light {
            settings.play_as_dark = false;
        }
        if let Some(name) = self.username {
            settings.username = name;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings_path = cli.config.unwrap_or_else(default_settings_path);
    let settings = load_settings(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    match cli.command {
        Command::Relay { port } => {
            let relay = RelayServer::bind(("0.0.0.0", port)).await?;
            relay.run_once().await?;
        }
        Command::Ai { overrides } => {
            let settings = overrides.apply(settings)?;
            let session = ai_game(&settings);
            run_terminal(session).await?;
        }
        Command::Host { port, overrides } => {
            let settings = overrides.apply(settings)?;
            let relay = RelayServer::bind(("0.0.0.0", port)).await?;
            let relay_addr = relay.local_addr()?;
            let relay_task = tokio::spawn(relay.run_once());
            info!("[NETWORK] Waiting for an opponent on port {}", relay_addr.port());

            let session = host_game(&settings, ("127.0.0.1", relay_addr.port())).await?;
            let result = run_terminal(session).await;
            relay_task.abort();
            result?;
        }
        Command::Join { addr, overrides } => {
            let settings = overrides.apply(settings)?;
            let session = join_game(&settings, addr.as_str()).await?;
            run_terminal(session).await?;
        }
    }

    Ok(())
}

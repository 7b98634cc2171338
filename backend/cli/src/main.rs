mod serve_cmd;
mod status_cmd;
mod token_cmd;
mod webhook_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pricefeed_config::Config;
use pricefeed_security::HandoffSecrets;

#[derive(Parser)]
#[command(name = "pricefeed")]
#[command(about = "onChain Price Feeds Telegram bot and handoff-token tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Verify a handoff token or deep link and print its claims
    Verify {
        /// Compact token, percent-encoded token, or full deep link
        token: String,
    },
    /// Issue a handoff link for a user without going through Telegram
    Link {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        username: Option<String>,
    },
    /// Register the webhook with Telegram
    SetWebhook {
        /// Public base URL of this server, e.g. https://bot.example.com
        url: String,
    },
    /// Query a running server's health endpoint
    Status,
}

/// Handoff keys derived from config: one shared secret unless `AUTH_TOKEN_SECRET` splits them.
pub(crate) fn handoff_secrets(config: &Config) -> HandoffSecrets {
    match &config.auth_token_secret {
        Some(signing) => HandoffSecrets::split(config.bot_token.clone(), signing.clone()),
        None => HandoffSecrets::shared(config.bot_token.clone()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = pricefeed_config::from_env();
    let cli = Cli::parse();

    // One-shot commands log to the console only.
    let log_dir = match cli.command {
        Commands::Serve { .. } => config.log_dir.as_str(),
        _ => "",
    };
    pricefeed_logging::init_logger(log_dir, &config.log_level);

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            serve_cmd::run(config).await?;
        }
        Commands::Verify { token } => token_cmd::verify(&config, &token)?,
        Commands::Link {
            id,
            first_name,
            username,
        } => token_cmd::link(&config, id, first_name, username)?,
        Commands::SetWebhook { url } => webhook_cmd::run(&config, &url).await?,
        Commands::Status => status_cmd::run(config.port).await?,
    }

    Ok(())
}

//! CLI Webhook Command

use anyhow::Result;

use pricefeed_channels::BotApiSender;
use pricefeed_config::Config;

pub async fn run(config: &Config, public_url: &str) -> Result<()> {
    if config.bot_token.is_empty() {
        anyhow::bail!("TELEGRAM_BOT_TOKEN is not set");
    }
    let url = format!("{}{}", public_url.trim_end_matches('/'), config.webhook_path);
    BotApiSender::new(config.bot_token.clone())
        .register_webhook(&url, config.webhook_secret.as_deref())
        .await?;
    println!("Webhook set to {url}");
    Ok(())
}

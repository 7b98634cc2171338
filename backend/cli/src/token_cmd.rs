//! CLI Token Commands
//!
//! Offline issuing and verification of handoff links, for operators and the
//! companion app's developers.

use anyhow::Result;
use chrono::{DateTime, Utc};

use pricefeed_config::Config;
use pricefeed_core::User;
use pricefeed_security::{issue_handoff, verify_token};

use crate::handoff_secrets;

pub fn verify(config: &Config, input: &str) -> Result<()> {
    let claims = verify_token(input, config.signing_secret(), &config.bot_token)?;
    println!("✅ Token is valid\n");
    println!("{}", serde_json::to_string_pretty(&claims)?);
    // authDate is in milliseconds, unlike the seconds used by the Login Widget
    if let Some(at) = DateTime::<Utc>::from_timestamp_millis(claims.assertion.auth_date) {
        println!("\nauthDate: {at}");
    }
    Ok(())
}

pub fn link(config: &Config, id: u64, first_name: String, username: Option<String>) -> Result<()> {
    let user = User {
        id,
        is_bot: false,
        first_name,
        last_name: None,
        username,
    };
    let handoff = issue_handoff(
        &user,
        Utc::now().timestamp_millis(),
        &handoff_secrets(config),
        &config.app_url,
    )?;
    println!("{}", handoff.link);
    Ok(())
}

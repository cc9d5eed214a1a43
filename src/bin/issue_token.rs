//! Mints an access token for a profile, e.g. to bootstrap the first
//! administrator before a sign-in service is wired up.
//!
//! Usage: `issue_token <profile-id> <name> <user|mod|admin> [space ...]`
use anyhow::{Context, Result, bail};
use qaboard::application::{dto::TokenSubject, ports::security::TokenManager};
use qaboard::config::AppConfig;
use qaboard::domain::profile::{ProfileId, ProfileRole};
use qaboard::infrastructure::security::token::BiscuitTokenManager;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(id), Some(name), Some(role)) = (args.next(), args.next(), args.next()) else {
        bail!("usage: issue_token <profile-id> <name> <user|mod|admin> [space ...]");
    };
    let spaces: Vec<String> = args.collect();

    let config = AppConfig::from_env()?;
    let manager = BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;

    let subject = TokenSubject {
        profile_id: ProfileId::new(id)?,
        name,
        role: role.parse::<ProfileRole>().context("invalid role")?,
        spaces,
    };

    let token = manager.issue(subject).await?;
    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}

//! Vault secret to dotenv file
//!
//! Usage: VAULT_ADDR=... VAULT_ROLE_ID=... VAULT_SECRET_ID=... \
//!        vault-fetcher -s app/prod -o .env

use clap::Parser;
use tracing::info;

use vault_deploy_tools::{cli::VaultFetcherArgs, commands, config::VaultConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = VaultFetcherArgs::parse();

    let config = VaultConfig::from_env()?;
    let resolved = commands::fetch_dotenv(&config, &args).await?;

    info!(
        secret = %resolved.name,
        version = resolved.version,
        output = %args.secret.output.display(),
        "Dotenv file written"
    );
    Ok(())
}

//! Vault secret to deployer Pod manifest
//!
//! Authenticates with approle, reads the latest non-destroyed version of the
//! secret and writes a Pod manifest carrying every key as an env var.
//!
//! Usage: VAULT_ADDR=... VAULT_ROLE_ID=... VAULT_SECRET_ID=... \
//!        pod-generator -s deployer -o pod.yaml

use clap::Parser;
use tracing::info;

use vault_deploy_tools::{cli::PodGeneratorArgs, commands, config::VaultConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = PodGeneratorArgs::parse();

    let config = VaultConfig::from_env()?;
    let resolved = commands::generate_pod(&config, &args).await?;

    info!(
        secret = %resolved.name,
        version = resolved.version,
        output = %args.secret.output.display(),
        "Pod manifest written"
    );
    Ok(())
}

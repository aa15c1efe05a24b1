//! Entry points for the three binaries

use std::path::Path;

use tracing::info;

use crate::adapters::{format_dotenv, format_pod_with_image, write_output};
use crate::cli::{ManifestArgs, PodGeneratorArgs, VaultFetcherArgs};
use crate::config::VaultConfig;
use crate::template::{self, TemplateParams};
use crate::vault::{self, ResolvedSecret};
use crate::{Error, Result};

/// Resolve the secret and write it as a deployer Pod manifest
pub async fn generate_pod(config: &VaultConfig, args: &PodGeneratorArgs) -> Result<ResolvedSecret> {
    let resolved = fetch(config, &args.secret.secret).await?;
    let manifest = format_pod_with_image(&resolved.payload, &args.image)?;
    write_output(&args.secret.output, &manifest)?;
    Ok(resolved)
}

/// Resolve the secret and write it as a dotenv file
pub async fn fetch_dotenv(config: &VaultConfig, args: &VaultFetcherArgs) -> Result<ResolvedSecret> {
    let resolved = fetch(config, &args.secret.secret).await?;
    write_output(&args.secret.output, &format_dotenv(&resolved.payload))?;
    Ok(resolved)
}

async fn fetch(config: &VaultConfig, secret: &str) -> Result<ResolvedSecret> {
    vault::resolve_version_with(config, secret, |name, version| {
        println!("Fetching {} version {}", name, version);
    })
    .await
}

/// Read the template and render it with the given arguments
pub fn render_manifest(args: &ManifestArgs) -> Result<String> {
    let template_text = read_template(&args.template)?;
    let params = TemplateParams::from_args(
        args.image.as_deref(),
        &args.template.display().to_string(),
        args.envs_path.as_deref(),
    )?;

    let rendered = template::render(&template_text, &params)?;
    info!(template = %args.template.display(), "Rendered manifest");
    Ok(rendered)
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::FileAccessError(format!("Failed to read template {}: {}", path.display(), e))
    })
}

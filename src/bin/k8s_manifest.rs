//! Kubernetes manifest template renderer
//!
//! Usage: k8s-manifest -t k8s/deployment.yaml -i ghcr.io/acme/app:1.2 -e app.env > out.yaml

use clap::Parser;

use vault_deploy_tools::{cli::ManifestArgs, commands, telemetry};

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = ManifestArgs::parse();

    let rendered = commands::render_manifest(&args)?;
    println!("{}", rendered);
    Ok(())
}

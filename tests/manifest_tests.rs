//! Integration tests for manifest template rendering

use std::path::Path;

use vault_deploy_tools::cli::ManifestArgs;
use vault_deploy_tools::commands::render_manifest;
use vault_deploy_tools::Error;

// ============================================================================
// Test Helpers
// ============================================================================

const TEMPLATE: &str = "apiVersion: apps/v1
kind: Deployment
spec:
  template:
    metadata:
      annotations:
        checksum/envs: \"{env_hash}\"
    spec:
      containers:
      - name: app
        image: {0.image}
        envFrom: [{{secretRef: {{name: app-envs}}}}]
";

fn write(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn args(template: &Path, image: Option<&str>, envs: Option<&Path>) -> ManifestArgs {
    ManifestArgs {
        envs_path: envs.map(Path::to_path_buf),
        image: image.map(str::to_string),
        template: template.to_path_buf(),
    }
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn renders_image_and_env_hash() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "deployment", TEMPLATE.as_bytes());
    let envs = write(dir.path(), "app.env", b"abc");

    let out = render_manifest(&args(&template, Some("ghcr.io/acme/app:1.0"), Some(envs.as_path()))).unwrap();

    assert!(out.contains("checksum/envs: \"900150983cd24fb0d6963f7d28e17f72\""));
    assert!(out.contains("image: ghcr.io/acme/app:1.0"));
    assert!(out.contains("envFrom: [{secretRef: {name: app-envs}}]"));
}

#[test]
fn rendering_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "deployment", TEMPLATE.as_bytes());
    let envs = write(dir.path(), "app.env", b"A=1\nB=2");
    let a = args(&template, Some("img:1"), Some(envs.as_path()));

    assert_eq!(render_manifest(&a).unwrap(), render_manifest(&a).unwrap());
}

#[test]
fn one_byte_change_in_env_file_changes_output() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "deployment", TEMPLATE.as_bytes());
    let envs = write(dir.path(), "app.env", b"A=1\nB=2");
    let a = args(&template, Some("img:1"), Some(envs.as_path()));

    let before = render_manifest(&a).unwrap();
    std::fs::write(&envs, b"A=1\nB=3").unwrap();
    let after = render_manifest(&a).unwrap();

    assert_ne!(before, after);
}

#[test]
fn env_hash_without_env_file_is_missing_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "deployment", TEMPLATE.as_bytes());

    let err = render_manifest(&args(&template, Some("img:1"), None)).unwrap_err();

    assert!(matches!(err, Error::MissingParameterError(ref key) if key == "env_hash"));
}

#[test]
fn template_without_env_hash_renders_without_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "service", b"image: {0.image}\nfrom: {0.template}");

    let out = render_manifest(&args(&template, Some("img:1"), None)).unwrap();

    assert_eq!(
        out,
        format!("image: img:1\nfrom: {}", template.display())
    );
}

#[test]
fn unset_image_and_envs_render_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "service", b"image: {0.image}\nenvs: {0.envs}");

    let out = render_manifest(&args(&template, None, None)).unwrap();

    assert_eq!(out, "image: None\nenvs: None");
}

#[test]
fn bare_argument_name_is_missing_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "service", b"image: {image}");

    let err = render_manifest(&args(&template, Some("img:1"), None)).unwrap_err();

    assert!(matches!(err, Error::MissingParameterError(ref key) if key == "image"));
}

#[test]
fn missing_template_is_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_manifest(&args(&dir.path().join("nope"), None, None)).unwrap_err();

    assert!(matches!(err, Error::FileAccessError(_)));
}

#[test]
fn missing_env_file_is_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let template = write(dir.path(), "deployment", TEMPLATE.as_bytes());

    let err = render_manifest(&args(&template, Some("img"), Some(dir.path().join("absent.env").as_path())))
        .unwrap_err();

    assert!(matches!(err, Error::FileAccessError(_)));
}

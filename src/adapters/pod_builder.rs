//! Kubernetes Pod builder for the deployer pod
//!
//! The pod idles (`sleep infinity`) and carries every secret key as a plain
//! environment variable so pipeline steps can `kubectl exec` into it.

use k8s_openapi::api::core::v1::{Container, EnvVar, Pod, PodSecurityContext, PodSpec};

use crate::vault::SecretPayload;
use crate::{Error, Result};

pub const DEFAULT_IMAGE: &str = "registry.digitalocean.com/bonq-ch/deployer:latest";
const CONTAINER_NAME: &str = "deployer";
const RUN_AS_ID: i64 = 1000;

/// Build a Pod whose single container exposes `payload` as env vars
pub fn build_pod(payload: &SecretPayload, image: &str) -> Pod {
    let env_vars: Vec<EnvVar> = payload
        .iter()
        .map(|(name, value)| EnvVar {
            name: name.clone(),
            value: Some(value.clone()),
            ..Default::default()
        })
        .collect();

    let container = Container {
        name: CONTAINER_NAME.to_string(),
        image: Some(image.to_string()),
        image_pull_policy: Some("Always".to_string()),
        command: Some(vec!["sleep".to_string()]),
        args: Some(vec!["infinity".to_string()]),
        env: Some(env_vars),
        ..Default::default()
    };

    Pod {
        spec: Some(PodSpec {
            security_context: Some(PodSecurityContext {
                run_as_user: Some(RUN_AS_ID),
                run_as_group: Some(RUN_AS_ID),
                ..Default::default()
            }),
            containers: vec![container],
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Render the deployer Pod manifest as YAML using the default image
pub fn format_pod(payload: &SecretPayload) -> Result<String> {
    format_pod_with_image(payload, DEFAULT_IMAGE)
}

/// Render the deployer Pod manifest as YAML
pub fn format_pod_with_image(payload: &SecretPayload, image: &str) -> Result<String> {
    let pod = build_pod(payload, image);
    serde_yaml::to_string(&pod)
        .map_err(|e| Error::SerializationError(format!("Failed to serialize Pod: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(pairs: &[(&str, &str)]) -> SecretPayload {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn container(pod: &Pod) -> &Container {
        &pod.spec.as_ref().unwrap().containers[0]
    }

    #[test]
    fn container_runs_sleep_infinity_as_deployer() {
        let pod = build_pod(&payload(&[]), DEFAULT_IMAGE);
        let c = container(&pod);

        assert_eq!(c.name, "deployer");
        assert_eq!(c.command.as_deref(), Some(&["sleep".to_string()][..]));
        assert_eq!(c.args.as_deref(), Some(&["infinity".to_string()][..]));
        assert_eq!(c.image_pull_policy.as_deref(), Some("Always"));
        assert_eq!(c.image.as_deref(), Some(DEFAULT_IMAGE));

        let ctx = pod.spec.as_ref().unwrap().security_context.as_ref().unwrap();
        assert_eq!(ctx.run_as_user, Some(1000));
        assert_eq!(ctx.run_as_group, Some(1000));
    }

    #[test]
    fn env_entries_follow_payload_order() {
        let pod = build_pod(&payload(&[("B", "2"), ("A", "1")]), DEFAULT_IMAGE);
        let env = container(&pod).env.as_ref().unwrap();

        let names: Vec<&str> = env.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(env[0].value.as_deref(), Some("2"));
    }

    #[test]
    fn yaml_has_pod_header() {
        let yaml = format_pod(&payload(&[("KEY", "value")])).unwrap();
        assert!(yaml.starts_with("apiVersion: v1\nkind: Pod\n"));
    }

    #[test]
    fn empty_payload_renders_empty_env_list() {
        let yaml = format_pod(&payload(&[])).unwrap();
        let pod: Pod = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(container(&pod).env.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn custom_image_is_used() {
        let yaml = format_pod_with_image(&payload(&[]), "ghcr.io/acme/deployer:1.2").unwrap();
        let pod: Pod = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(container(&pod).image.as_deref(), Some("ghcr.io/acme/deployer:1.2"));
    }
}

//! Kubernetes manifest template rendering
//!
//! Templates use a small subset of Python-style format fields:
//!
//! - `{{` and `}}` produce literal braces
//! - `{0.name}` substitutes an attribute of the argument set (`image`,
//!   `template`, `envs`); an option that was not given renders as `None`
//! - `{name}` substitutes a keyword value; the only one is `env_hash`
//!
//! `env_hash` is only available when an environment file was supplied, and
//! referencing it otherwise is an error rather than a blank substitution.

use std::collections::BTreeMap;
use std::path::Path;

use md5::{Digest, Md5};
use tracing::debug;

use crate::{Error, Result};

pub const ENV_HASH: &str = "env_hash";
const ARGS_PREFIX: &str = "0.";
const UNSET_ARG: &str = "None";

/// Values available to a template
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateParams {
    /// Attributes of the argument set, reachable as `{0.name}`
    args: BTreeMap<String, Option<String>>,
    /// Keyword values, reachable as `{name}`
    keywords: BTreeMap<String, String>,
}

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the parameter set from the renderer arguments.
    ///
    /// Reads and hashes `envs_path` when given.
    pub fn from_args(image: Option<&str>, template: &str, envs_path: Option<&Path>) -> Result<Self> {
        let mut params = Self::new();
        params.set_arg("image", image);
        params.set_arg("template", Some(template));

        let envs = envs_path.map(|p| p.display().to_string());
        params.set_arg("envs", envs.as_deref());

        if let Some(path) = envs_path {
            params.insert(ENV_HASH, &env_file_hash(path)?);
        }
        Ok(params)
    }

    /// Set an argument attribute; `None` marks an option that was not given
    pub fn set_arg(&mut self, name: &str, value: Option<&str>) {
        self.args
            .insert(name.to_string(), value.map(str::to_string));
    }

    /// Set a keyword value
    pub fn insert(&mut self, name: &str, value: &str) {
        self.keywords.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.keywords.get(name).map(String::as_str)
    }

    pub fn arg(&self, name: &str) -> Option<Option<&str>> {
        self.args.get(name).map(Option::as_deref)
    }

    fn lookup(&self, field: &str) -> Result<&str> {
        if field.contains('!') || field.contains(':') {
            return Err(Error::TemplateSyntaxError(format!(
                "conversions and format specs are not supported: '{{{}}}'",
                field
            )));
        }
        if field == "0" {
            return Err(Error::TemplateSyntaxError(
                "argument set must be used with an attribute, e.g. '{0.image}'".to_string(),
            ));
        }

        match field.strip_prefix(ARGS_PREFIX) {
            Some(attr) => self
                .arg(attr)
                .map(|value| value.unwrap_or(UNSET_ARG))
                .ok_or_else(|| Error::MissingParameterError(field.to_string())),
            None => self
                .get(field)
                .ok_or_else(|| Error::MissingParameterError(field.to_string())),
        }
    }
}

/// Lowercase hex MD5 of a byte slice
pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

/// Lowercase hex MD5 of a file's raw bytes
pub fn env_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::FileAccessError(format!("Failed to read env file {}: {}", path.display(), e))
    })?;
    let hash = md5_hex(&bytes);
    debug!(path = %path.display(), %hash, "Hashed env file");
    Ok(hash)
}

/// Substitute `params` into `template`
pub fn render(template: &str, params: &TemplateParams) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(Error::TemplateSyntaxError(
                                "unclosed '{' in replacement field".to_string(),
                            ))
                        }
                        Some(ch) => field.push(ch),
                    }
                }
                let field = field.trim();
                if field.is_empty() {
                    return Err(Error::TemplateSyntaxError(
                        "empty replacement field '{}'".to_string(),
                    ));
                }
                out.push_str(params.lookup(field)?);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(Error::TemplateSyntaxError(
                    "single '}' encountered; use '}}' for a literal brace".to_string(),
                ))
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

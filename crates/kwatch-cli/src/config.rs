use crate::cli::ObjectKind;
use kwatch_api::{ApiObject, ApiVersion, Service};
use kwatch_core::{FieldPath, StructuredIssue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const CONFIG_SCHEMA_0_0_1: &str = "kwatch/0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KwatchConfig {
    #[serde(default = "default_config_schema")]
    pub schema: String,
    #[serde(default)]
    pub kind: Option<ObjectKind>,
    #[serde(default)]
    pub api_version: Option<ApiVersion>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for KwatchConfig {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            kind: None,
            api_version: None,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("config validation failed: {}", render_issues(.0))]
    Validation(Vec<StructuredIssue>),
}

/// Loads the config at `path`, or the defaults when no path is given.
pub fn load_effective_config(path: Option<&Path>) -> Result<KwatchConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(KwatchConfig::default()),
    }
}

pub fn load_config(path: &Path) -> Result<KwatchConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str()).map_err(ConfigError::Parse)?;
    let config: KwatchConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| ConfigError::Parse(format!("json decode error: {error}")))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| ConfigError::Parse(format!("yaml decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| ConfigError::Parse(error.to_string()))?,
    };

    let mut issues = validate_config(&config);
    StructuredIssue::sort_stable(&mut issues);
    if !issues.is_empty() {
        return Err(ConfigError::Validation(issues));
    }
    tracing::debug!(path = %path.display(), "loaded kwatch config");
    Ok(config)
}

pub fn validate_config(config: &KwatchConfig) -> Vec<StructuredIssue> {
    let mut issues = Vec::<StructuredIssue>::new();
    if config.schema != CONFIG_SCHEMA_0_0_1 {
        issues.push(config_issue(
            "kwatch.config.schema",
            FieldPath::keys(["schema"]),
            format!(
                "unsupported config schema `{}` (expected `{CONFIG_SCHEMA_0_0_1}`)",
                config.schema
            ),
        ));
    }
    if let (Some(ObjectKind::Service), Some(version)) = (config.kind, config.api_version) {
        if !Service::supports(version) {
            issues.push(config_issue(
                "kwatch.config.api_version.kind",
                FieldPath::keys(["api_version"]),
                format!("api version `{version}` has no `{}` kind", Service::KIND),
            ));
        }
    }
    if let Err(error) = EnvFilter::try_new(config.logging.filter.as_str()) {
        issues.push(config_issue(
            "kwatch.config.logging.filter",
            FieldPath::keys(["logging", "filter"]),
            format!("invalid log filter `{}`: {error}", config.logging.filter),
        ));
    }
    issues
}

fn config_issue(reference: &str, path: FieldPath, message: String) -> StructuredIssue {
    StructuredIssue::error("kwatch_config_error", path, message).with_reference(reference)
}

fn render_issues(issues: &[StructuredIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_config_schema() -> String {
    CONFIG_SCHEMA_0_0_1.to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err("unterminated env placeholder `${...`".to_string());
        };
        let key = &after[..end];
        if key.is_empty() {
            return Err("empty env placeholder `${}`".to_string());
        }
        let value = std::env::var(key)
            .map_err(|_| format!("missing env var for placeholder `${{{key}}}`"))?;
        out.push_str(value.as_str());
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Route table configuration files.
//!
//! A configuration lists named routes with their HTTP method and path
//! template. The format is chosen by file extension: `.yaml`/`.yml`,
//! `.toml`, anything else is read as JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_method() -> String {
    "GET".to_string()
}

/// One route entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route (handler) name
    pub name: String,
    /// HTTP method, case-insensitive. Defaults to `GET`.
    #[serde(default = "default_method")]
    pub method: String,
    /// Path template, e.g. `/v1/{name=shelves/*}`
    pub pattern: String,
}

/// Top-level routes file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Routes in registration order
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Load a routes configuration from `path`
pub fn load_routes_config(path: impl AsRef<Path>) -> Result<RoutesConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read routes config {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let config: RoutesConfig = match extension.as_deref() {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        Some("toml") => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
    };

    tracing::debug!(
        path = %path.display(),
        routes = config.routes.len(),
        "Routes config loaded"
    );
    Ok(config)
}

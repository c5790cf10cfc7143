use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable consulted when the config file carries no token.
pub const TOKEN_ENV_VAR: &str = "ERP_API_TOKEN";

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub screens: HashMap<String, ScreenConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    /// Enforced by the HTTP client; the filter engine has no timeouts of its own
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Per-screen overrides of the built-in definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenConfig {
    pub path: Option<String>,
    pub schema: Option<PathBuf>,
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Config pointing at `base_url` with defaults for everything else.
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.to_string(),
                token: None,
                timeout_seconds: default_timeout(),
            },
            screens: HashMap::new(),
        }
    }

    /// List endpoint of a screen: the configured override, else `default`.
    pub fn list_path<'a>(&'a self, screen: &str, default: &'a str) -> &'a str {
        self.screens
            .get(screen)
            .and_then(|s| s.path.as_deref())
            .unwrap_or(default)
    }

    pub fn schema_path(&self, screen: &str) -> Option<&Path> {
        self.screens.get(screen).and_then(|s| s.schema.as_deref())
    }
}

impl ApiConfig {
    /// Token from the config file, falling back to the environment.
    pub fn resolve_token(&self) -> Option<String> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_token`](Self::resolve_token) with `env` standing in
    /// for the process environment.
    pub fn resolve_token_with<F>(&self, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| env(TOKEN_ENV_VAR).filter(|t| !t.is_empty()))
    }
}

fn default_timeout() -> u64 {
    30
}

//! Login Gateway
//!
//! A small HTTP service fronting a Supabase auth server:
//! - `POST /login?provider=…` redirects the browser to the provider-hosted sign-in page
//! - `GET /auth/providers` lists the providers the gateway accepts
//! - `GET /health` for liveness checks

pub mod api;
pub mod auth;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use crate::auth::provider::Provider;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    /// Auth section: may also be assembled from `SUPABASE_*` env vars
    pub auth: Option<AuthConfig>,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
    /// Log auth service failures with their details
    pub dev_mode: bool,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            dev_mode: false,
        }
    }
}

/// Supabase auth server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Project URL (e.g. "https://xyzcompany.supabase.co")
    pub supabase_url: String,
    /// Public anon key, sent as `apikey`
    pub anon_key: String,
    /// Where the auth server sends the browser after sign-in
    #[serde(default = "default_redirect_to")]
    pub redirect_to: String,
    /// Extra OAuth scopes requested per provider (space separated)
    #[serde(default)]
    pub scopes: HashMap<Provider, String>,
}

impl AuthConfig {
    /// Minimal config with default redirect target and no extra scopes.
    pub fn new(supabase_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            supabase_url: supabase_url.into(),
            anon_key: anon_key.into(),
            redirect_to: default_redirect_to(),
            scopes: HashMap::new(),
        }
    }
}

fn default_redirect_to() -> String {
    "http://localhost:3000/dashboard".to_string()
}

/// Parse a boolean env flag ("1", "true", "yes", "on" and their negations).
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub dev_mode: bool,
    /// None when neither the YAML file nor the environment configures auth
    pub auth_config: Option<AuthConfig>,
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            dev_mode: std::env::var("DEV_MODE")
                .ok()
                .and_then(|s| parse_flag(&s))
                .unwrap_or(yaml.server.dev_mode),
            auth_config: Self::auth_with_env(yaml.auth),
        })
    }

    /// Overlay `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `AUTH_REDIRECT_TO` on the
    /// YAML auth section. Both URL and key are needed to build one from scratch.
    fn auth_with_env(yaml_auth: Option<AuthConfig>) -> Option<AuthConfig> {
        let url = std::env::var("SUPABASE_URL").ok();
        let key = std::env::var("SUPABASE_ANON_KEY").ok();

        let mut auth = match (yaml_auth, url, key) {
            (Some(mut auth), url, key) => {
                if let Some(url) = url {
                    auth.supabase_url = url;
                }
                if let Some(key) = key {
                    auth.anon_key = key;
                }
                auth
            }
            (None, Some(url), Some(key)) => AuthConfig::new(url, key),
            (None, _, _) => return None,
        };

        if let Ok(redirect_to) = std::env::var("AUTH_REDIRECT_TO") {
            auth.redirect_to = redirect_to;
        }
        Some(auth)
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// Build the shared state and serve the API until Ctrl+C.
pub async fn start_server(config: Config) -> Result<()> {
    let auth_config = config.auth_config.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "Auth is not configured: add an `auth` section to config.yaml or set SUPABASE_URL and SUPABASE_ANON_KEY"
        )
    })?;

    let state = Arc::new(api::handlers::ServerState::new(auth_config, config.dev_mode)?);
    let app = api::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Login gateway listening on http://{}", addr);
    if config.dev_mode {
        tracing::warn!("Development mode: auth service failures are logged with details");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// ============================================================================
// Tests
// ============================================================================

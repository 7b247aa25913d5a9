//! Supabase (GoTrue) OAuth sign-in client.
//!
//! Produces the provider-hosted sign-in URL for a login request:
//! 1. Read the auth server's public settings to confirm the provider is enabled
//! 2. Build the `/auth/v1/authorize` URL carrying the provider and redirect target

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::provider::Provider;
use crate::AuthConfig;

/// The external "sign in with OAuth" capability.
///
/// Returns the URL the browser should be sent to so the user can
/// authenticate with `provider`, landing on `redirect_to` afterwards.
#[async_trait]
pub trait OAuthSignIn: Send + Sync {
    async fn sign_in_with_oauth(&self, provider: Provider, redirect_to: &str) -> Result<String>;
}

/// GoTrue `/auth/v1/settings` response (subset of fields we need).
#[derive(Debug, Deserialize)]
struct SettingsResponse {
    #[serde(default)]
    external: HashMap<String, bool>,
}

/// HTTP client for a Supabase project's auth server.
pub struct SupabaseAuthClient {
    base_url: String,
    anon_key: String,
    scopes: HashMap<Provider, String>,
    http_client: reqwest::Client,
}

impl SupabaseAuthClient {
    /// Create a new client from the auth configuration.
    ///
    /// Surrounding whitespace and trailing slashes are dropped from the
    /// project URL; what remains must parse as an absolute URL.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let base_url = config
            .supabase_url
            .trim()
            .trim_end_matches('/')
            .to_string();
        reqwest::Url::parse(&base_url)
            .with_context(|| format!("Invalid supabase_url {:?}", config.supabase_url))?;

        Ok(Self {
            base_url,
            anon_key: config.anon_key.trim().to_string(),
            scopes: config.scopes.clone(),
            http_client: reqwest::Client::new(),
        })
    }

    /// Build the authorize URL for `provider`.
    ///
    /// Scopes are only appended when configured for that provider.
    pub fn authorize_url(&self, provider: Provider, redirect_to: &str) -> String {
        let mut url = format!(
            "{}/auth/v1/authorize?provider={}&redirect_to={}",
            self.base_url,
            provider,
            urlencoding::encode(redirect_to),
        );
        if let Some(scopes) = self.scopes.get(&provider) {
            url.push_str("&scopes=");
            url.push_str(&urlencoding::encode(scopes));
        }
        url
    }

    /// Fetch the external providers enabled on the auth server.
    async fn enabled_providers(&self) -> Result<HashMap<String, bool>> {
        let response = self
            .http_client
            .get(format!("{}/auth/v1/settings", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .context("Failed to request auth settings")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "no body".to_string());
            bail!("Auth settings request failed ({}): {}", status, body);
        }

        let settings: SettingsResponse = response
            .json()
            .await
            .context("Failed to parse auth settings response")?;

        Ok(settings.external)
    }
}

#[async_trait]
impl OAuthSignIn for SupabaseAuthClient {
    async fn sign_in_with_oauth(&self, provider: Provider, redirect_to: &str) -> Result<String> {
        let enabled = self.enabled_providers().await?;
        if !enabled.get(provider.as_str()).copied().unwrap_or(false) {
            bail!("Provider {} is not enabled on the auth server", provider);
        }

        Ok(self.authorize_url(provider, redirect_to))
    }
}

// ============================================================================
// Tests
// ============================================================================

//! OAuth redirect initiation.
//!
//! Turns a login request into exactly one [`LoginOutcome`]: a redirect to the
//! provider-hosted sign-in page, or a failure the caller reports to the client.

use anyhow::Context;
use axum::http::HeaderValue;
use serde::Deserialize;

use super::provider::{Provider, ProviderError};
use super::supabase::OAuthSignIn;

/// Client-visible message for every auth service failure.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Query parameters of `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub provider: Option<String>,
}

/// Per-process settings consulted on every login.
#[derive(Debug, Clone)]
pub struct LoginOptions {
    /// Post-authentication target handed to the auth service. Never derived
    /// from the incoming request.
    pub redirect_to: String,
    /// Emit diagnostic logs on auth service failures.
    pub dev_mode: bool,
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Send the browser to this provider-hosted URL.
    Redirect(String),
    /// The request named no provider, or one outside the supported set.
    /// The auth service was not called.
    Rejected(ProviderError),
    /// The auth service call failed; details stay server-side.
    Failed,
}

/// Ask the auth service for a sign-in URL for the requested provider.
pub async fn initiate_login(
    service: &dyn OAuthSignIn,
    request: &LoginRequest,
    options: &LoginOptions,
) -> LoginOutcome {
    let provider = match Provider::from_query(request.provider.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!("Rejected login request: {}", e);
            return LoginOutcome::Rejected(e);
        }
    };

    let result = service
        .sign_in_with_oauth(provider, &options.redirect_to)
        .await
        .and_then(|url| {
            HeaderValue::from_str(&url).context("Sign-in URL is not a valid Location header")?;
            Ok(url)
        });

    match result {
        Ok(url) => LoginOutcome::Redirect(url),
        Err(e) => {
            if options.dev_mode {
                tracing::error!(
                    "Error logging in with OAuth. Provider: {}. Error: {:#}",
                    provider,
                    e
                );
            }
            LoginOutcome::Failed
        }
    }
}

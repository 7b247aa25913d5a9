//! Shared server state, error mapping and the health check.

use crate::auth::login::LoginOptions;
use crate::auth::supabase::{OAuthSignIn, SupabaseAuthClient};
use crate::AuthConfig;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Shared server state
pub struct ServerState {
    /// External OAuth sign-in capability (Supabase in production)
    pub auth_service: Arc<dyn OAuthSignIn>,
    /// Fixed redirect target and dev-mode flag, read on every login
    pub login_options: LoginOptions,
}

/// Shared gateway state
pub type GatewayState = Arc<ServerState>;

impl ServerState {
    /// Build the production state backed by the Supabase auth server.
    pub fn new(auth_config: &AuthConfig, dev_mode: bool) -> anyhow::Result<Self> {
        Ok(Self {
            auth_service: Arc::new(SupabaseAuthClient::new(auth_config)?),
            login_options: LoginOptions {
                redirect_to: auth_config.redirect_to.clone(),
                dev_mode,
            },
        })
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health: liveness only; the auth server is not contacted.
pub async fn health(State(_state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Errors
// ============================================================================

/// API error, rendered as `{ "error": message }`
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_renders_json_error() {
        let resp = AppError::BadRequest("nope".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "nope");
    }

    #[test]
    fn test_state_uses_configured_redirect() {
        let mut config = crate::test_helpers::test_auth_config();
        config.redirect_to = "https://app.example.com/home".to_string();
        let state = ServerState::new(&config, true).unwrap();

        assert_eq!(state.login_options.redirect_to, "https://app.example.com/home");
        assert!(state.login_options.dev_mode);
    }

    #[test]
    fn test_state_rejects_invalid_project_url() {
        let mut config = crate::test_helpers::test_auth_config();
        config.supabase_url = "not a url".to_string();

        let err = ServerState::new(&config, false).err().unwrap();
        assert!(err.to_string().contains("Invalid supabase_url"));
    }
}

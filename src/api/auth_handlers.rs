//! Authentication route handlers: OAuth login redirect and provider discovery.
//!
//! Endpoints:
//! - `POST /login?provider=…`: 303 to the provider-hosted sign-in page
//! - `GET  /auth/providers`: Lists the providers accepted by `/login`

use crate::api::handlers::{AppError, GatewayState};
use crate::auth::login::{initiate_login, LoginOutcome, LoginRequest, GENERIC_FAILURE};
use crate::auth::provider::Provider;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

/// Response for GET /auth/providers
#[derive(Debug, Serialize)]
pub struct AuthProvidersResponse {
    pub providers: Vec<Provider>,
}

impl IntoResponse for LoginOutcome {
    fn into_response(self) -> Response {
        match self {
            LoginOutcome::Redirect(url) => Redirect::to(&url).into_response(),
            LoginOutcome::Rejected(_) => {
                AppError::BadRequest("Unsupported provider".to_string()).into_response()
            }
            LoginOutcome::Failed => AppError::BadRequest(GENERIC_FAILURE.to_string()).into_response(),
        }
    }
}

/// POST /login: Start the OAuth flow for `?provider=`.
///
/// A missing provider reaches validation. A query that does not deserialize
/// at all (e.g. `provider` given twice) is answered with the same
/// `{ "error": … }` body instead of axum's plain-text rejection.
pub async fn login(
    State(state): State<GatewayState>,
    query: Result<Query<LoginRequest>, QueryRejection>,
) -> Result<LoginOutcome, AppError> {
    let Query(req) = query.map_err(|e| {
        tracing::debug!("Malformed login query: {}", e);
        AppError::BadRequest("Malformed query string".to_string())
    })?;

    Ok(initiate_login(state.auth_service.as_ref(), &req, &state.login_options).await)
}

/// GET /auth/providers: Discovery endpoint for the login UI. Always public.
pub async fn get_auth_providers() -> Json<AuthProvidersResponse> {
    Json(AuthProvidersResponse {
        providers: Provider::ALL.to_vec(),
    })
}

// ============================================================================
// Tests
// ============================================================================

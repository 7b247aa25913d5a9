//! Test helper factories and mock state builders
//!
//! Provides an in-memory auth service double, mock server state, and a
//! log capture helper for asserting on `tracing` output.
#![allow(dead_code)]

use crate::api::handlers::{GatewayState, ServerState};
use crate::auth::login::LoginOptions;
use crate::auth::provider::Provider;
use crate::auth::supabase::OAuthSignIn;
use crate::AuthConfig;
use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

// ============================================================================
// Mock auth service
// ============================================================================

/// In-memory `OAuthSignIn` returning a canned result and recording each call.
pub struct MockAuthService {
    result: std::result::Result<String, String>,
    calls: RwLock<Vec<(Provider, String)>>,
}

impl MockAuthService {
    /// Every sign-in succeeds with `url`.
    pub fn succeeding(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Every sign-in fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// `(provider, redirect_to)` of every call so far, in order.
    pub async fn calls(&self) -> Vec<(Provider, String)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl OAuthSignIn for MockAuthService {
    async fn sign_in_with_oauth(&self, provider: Provider, redirect_to: &str) -> Result<String> {
        self.calls
            .write()
            .await
            .push((provider, redirect_to.to_string()));
        self.result.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

// ============================================================================
// Mock state builders
// ============================================================================

/// Create a test AuthConfig pointing at a placeholder Supabase project.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig::new("https://project.supabase.co", "anon-key")
}

/// Create server state around `service` with the default redirect target.
pub fn mock_state(service: Arc<dyn OAuthSignIn>, dev_mode: bool) -> GatewayState {
    Arc::new(ServerState {
        auth_service: service,
        login_options: LoginOptions {
            redirect_to: test_auth_config().redirect_to,
            dev_mode,
        },
    })
}

// ============================================================================
// Log capture
// ============================================================================

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `fut` with a thread-local subscriber and return its output plus
/// everything logged at DEBUG and above. Needs a current-thread runtime
/// (the `#[tokio::test]` default).
pub async fn capture_logs<F: Future>(fut: F) -> (F::Output, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    let output = fut.await;

    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (output, logs)
}

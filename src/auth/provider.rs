//! Identity providers accepted by the auth server's OAuth flow.
//!
//! The set is closed: a login request naming anything else is rejected
//! before any outbound call is made.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a raw `provider` query value could not be turned into a [`Provider`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("no provider given")]
    Missing,
    #[error("unsupported provider: {0}")]
    Unsupported(String),
}

/// OAuth identity provider, as named on the wire (`?provider=github`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Apple,
    Azure,
    Bitbucket,
    Discord,
    Facebook,
    Figma,
    Fly,
    Github,
    Gitlab,
    Google,
    Kakao,
    Keycloak,
    Linkedin,
    LinkedinOidc,
    Notion,
    Slack,
    SlackOidc,
    Spotify,
    Twitch,
    Twitter,
    Workos,
    Zoom,
}

impl Provider {
    /// Every provider, in wire-name order.
    pub const ALL: [Provider; 22] = [
        Self::Apple,
        Self::Azure,
        Self::Bitbucket,
        Self::Discord,
        Self::Facebook,
        Self::Figma,
        Self::Fly,
        Self::Github,
        Self::Gitlab,
        Self::Google,
        Self::Kakao,
        Self::Keycloak,
        Self::Linkedin,
        Self::LinkedinOidc,
        Self::Notion,
        Self::Slack,
        Self::SlackOidc,
        Self::Spotify,
        Self::Twitch,
        Self::Twitter,
        Self::Workos,
        Self::Zoom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Azure => "azure",
            Self::Bitbucket => "bitbucket",
            Self::Discord => "discord",
            Self::Facebook => "facebook",
            Self::Figma => "figma",
            Self::Fly => "fly",
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Google => "google",
            Self::Kakao => "kakao",
            Self::Keycloak => "keycloak",
            Self::Linkedin => "linkedin",
            Self::LinkedinOidc => "linkedin_oidc",
            Self::Notion => "notion",
            Self::Slack => "slack",
            Self::SlackOidc => "slack_oidc",
            Self::Spotify => "spotify",
            Self::Twitch => "twitch",
            Self::Twitter => "twitter",
            Self::Workos => "workos",
            Self::Zoom => "zoom",
        }
    }

    /// Parse the optional raw query value into a provider.
    pub fn from_query(raw: Option<&str>) -> Result<Self, ProviderError> {
        match raw {
            None => Err(ProviderError::Missing),
            Some(s) if s.trim().is_empty() => Err(ProviderError::Missing),
            Some(s) => s.parse(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| ProviderError::Unsupported(s.to_string()))
    }
}

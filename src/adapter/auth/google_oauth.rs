//! Google OAuth Client
//!
//! インストール型アプリ向けのOAuth 2.0クライアント
//!
//! 同意フローは手動で行う。ユーザーが認可URLを開いて承認し、
//! コードかリダイレクトURL全体を貼り付ける。

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use reqwest::Url;
use serde::Deserialize;

use crate::domain::entities::client_config::ClientSecrets;
use crate::domain::entities::credential::CachedCredential;
use crate::domain::repositories::oauth_repository::OAuthRepository;

pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const FALLBACK_REDIRECT_URI: &str = "http://localhost";
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

pub struct GoogleOAuthClient {
    client: reqwest::Client,
    scope: String,
}

impl GoogleOAuthClient {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            scope: scope.into(),
        }
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn post_token(&self, token_uri: &str, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .client
            .post(token_uri)
            .header("Accept", "application/json")
            .form(form)
            .send()
            .await
            .context("Cannot reach the OAuth token endpoint")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Cannot read the token response")?;
        debug!("Token endpoint returned {}", status);

        let token: TokenResponse = serde_json::from_str(&body)
            .with_context(|| format!("Cannot parse token response ({}): {}", status, body))?;

        if !status.is_success() && token.error.is_none() {
            bail!("Token endpoint returned {}: {}", status, body);
        }
        Ok(token)
    }
}

/// Redirect URI registered for the client, or `http://localhost`
fn redirect_uri(secrets: &ClientSecrets) -> &str {
    secrets
        .redirect_uris
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_REDIRECT_URI)
}

fn token_uri(secrets: &ClientSecrets) -> &str {
    secrets.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
}

/// Build the consent URL for the client
pub fn build_authorization_url(secrets: &ClientSecrets, scope: &str) -> Result<String> {
    let base = secrets.auth_uri.as_deref().unwrap_or(DEFAULT_AUTH_URI);
    let url = Url::parse_with_params(
        base,
        &[
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri(secrets)),
            ("response_type", "code"),
            ("scope", scope),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .with_context(|| format!("Invalid authorization endpoint: {}", base))?;
    Ok(url.into())
}

/// Pull the authorization code out of what the user pasted
///
/// Accepts either the bare code or the full redirect URL.
pub fn extract_authorization_code(pasted: &str) -> Result<String> {
    let pasted = pasted.trim();
    if pasted.is_empty() {
        bail!("No verification code entered");
    }

    match Url::parse(pasted) {
        Ok(url) => {
            let mut code = None;
            for (key, value) in url.query_pairs() {
                match key.as_ref() {
                    "code" => code = Some(value.into_owned()),
                    "error" => bail!("Authorization was denied: {}", value),
                    _ => {}
                }
            }
            code.filter(|c| !c.is_empty())
                .context("The pasted URL does not contain an authorization code")
        }
        Err(_) => Ok(pasted.to_string()),
    }
}

/// Turn a token response into a credential that can be cached
///
/// `previous_refresh` is kept when the response does not carry a new refresh
/// token, which is the normal case for a refresh grant.
pub fn credential_from_response(
    response: TokenResponse,
    now: DateTime<Utc>,
    previous_refresh: Option<String>,
) -> Result<CachedCredential> {
    if let Some(error) = response.error {
        match response.error_description {
            Some(description) => bail!("OAuth error {}: {}", error, description),
            None => bail!("OAuth error {}", error),
        }
    }

    let access_token = response
        .access_token
        .filter(|t| !t.is_empty())
        .context("Token response has no access_token")?;
    let expires_in = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);

    Ok(CachedCredential {
        access_token,
        refresh_token: response.refresh_token.or(previous_refresh),
        token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
        expires_at: now + Duration::seconds(expires_in),
        scope: response.scope,
    })
}

#[async_trait]
impl OAuthRepository for GoogleOAuthClient {
    fn authorization_url(&self, secrets: &ClientSecrets) -> Result<String> {
        build_authorization_url(secrets, &self.scope)
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn exchange_code(&self, secrets: &ClientSecrets, pasted: &str) -> Result<CachedCredential> {
        let code = extract_authorization_code(pasted)?;
        let response = self
            .post_token(
                token_uri(secrets),
                &[
                    ("code", code.as_str()),
                    ("client_id", secrets.client_id.as_str()),
                    ("client_secret", secrets.client_secret.as_str()),
                    ("redirect_uri", redirect_uri(secrets)),
                    ("grant_type", "authorization_code"),
                ],
            )
            .await?;

        let credential = credential_from_response(response, Utc::now(), None)?;
        info!("Obtained a new access token");
        Ok(credential)
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn refresh(
        &self,
        secrets: &ClientSecrets,
        credential: &CachedCredential,
    ) -> Result<CachedCredential> {
        let refresh_token = credential
            .refresh_token
            .as_deref()
            .context("No refresh token available")?;

        let response = self
            .post_token(
                token_uri(secrets),
                &[
                    ("client_id", secrets.client_id.as_str()),
                    ("client_secret", secrets.client_secret.as_str()),
                    ("refresh_token", refresh_token),
                    ("grant_type", "refresh_token"),
                ],
            )
            .await?;

        let refreshed =
            credential_from_response(response, Utc::now(), credential.refresh_token.clone())?;
        info!("Refreshed the access token");
        Ok(refreshed)
    }
}

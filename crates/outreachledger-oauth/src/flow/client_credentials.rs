//! Client Credentials Flow implementation.

use std::collections::HashMap;
use std::time::Duration;

use super::OAuthClient;
use crate::error::{Error, Result};
use crate::token::{ErrorResponse, Token, TokenResponse};

/// Request timeout for the token exchange.
const TOKEN_TIMEOUT: Duration = Duration::from_secs(20);

/// Client Credentials Flow for `OAuth2`.
///
/// This flow is suitable for daemons and scheduled jobs acting with their
/// own identity rather than on behalf of a user. The client authenticates
/// with its ID and secret and receives an app-only access token. Tokens are
/// not cached; each call performs a fresh exchange.
#[derive(Debug)]
pub struct ClientCredentialsFlow {
    client: OAuthClient,
}

impl ClientCredentialsFlow {
    /// Creates a new client credentials flow.
    #[must_use]
    pub const fn new(client: OAuthClient) -> Self {
        Self { client }
    }

    /// Exchanges the client credentials for an access token.
    ///
    /// # Arguments
    ///
    /// * `scopes` - Optional scopes to request (uses provider defaults if None)
    ///
    /// # Errors
    ///
    /// Returns an error if the client has no secret configured, the request
    /// fails, the server rejects the grant, or the response carries no
    /// access token.
    pub async fn fetch_token(&self, scopes: Option<&[String]>) -> Result<Token> {
        let secret = self
            .client
            .client_secret
            .as_deref()
            .ok_or_else(|| Error::InvalidConfig("client_secret is required".into()))?;

        let scope = scopes.map_or_else(
            || self.client.provider.default_scopes.join(" "),
            |s| s.join(" "),
        );

        let mut params = HashMap::new();
        params.insert("grant_type", "client_credentials");
        params.insert("client_id", &self.client.client_id);
        params.insert("client_secret", secret);
        if !scope.is_empty() {
            params.insert("scope", &scope);
        }

        let response = self
            .client
            .http_client
            .post(self.client.provider.token_url.clone())
            .form(&params)
            .timeout(TOKEN_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(serde_json::from_str::<ErrorResponse>(&body).map_or_else(
                |_| Error::InvalidResponse(format!("token endpoint returned {status}")),
                ErrorResponse::into_error,
            ));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)?;
        Token::from_response(token_response)
    }
}

use oauth2::basic::BasicClient;
use oauth2::url::Url;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};

use crate::config::GoogleConfig;

pub(crate) const PENDING_OAUTH_KEY: &str = "auth.google.pending";

/// CSRF state and PKCE verifier parked in the session between the redirect
/// to Google and the callback.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PendingOAuth {
    pub state: String,
    pub verifier: String,
}

/// Profile returned by Google's userinfo endpoint.
#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

pub struct GoogleOAuth {
    config: GoogleConfig,
}

impl GoogleOAuth {
    pub fn new(config: GoogleConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> anyhow::Result<ConfiguredClient> {
        Ok(
            BasicClient::new(ClientId::new(self.config.client_id.clone()))
                .set_client_secret(ClientSecret::new(self.config.client_secret.clone()))
                .set_auth_uri(AuthUrl::new(
                    "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
                )?)
                .set_token_uri(TokenUrl::new(
                    "https://oauth2.googleapis.com/token".to_string(),
                )?)
                .set_redirect_uri(RedirectUrl::new(self.config.redirect_url.clone())?),
        )
    }

    /// Authorization URL plus the state/verifier pair to park in the session.
    pub fn authorize_url(&self) -> anyhow::Result<(Url, PendingOAuth)> {
        let client = self.client()?;
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        Ok((
            url,
            PendingOAuth {
                state: csrf_state.secret().clone(),
                verifier: pkce_verifier.secret().clone(),
            },
        ))
    }

    /// Exchange the callback code for a token and fetch the user's profile.
    pub async fn exchange(&self, code: String, verifier: String) -> anyhow::Result<GoogleProfile> {
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let token = self
            .client()?
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(PkceCodeVerifier::new(verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| anyhow::anyhow!("token exchange failed: {e}"))?;

        let profile = reqwest::Client::new()
            .get("https://www.googleapis.com/oauth2/v2/userinfo")
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleProfile>()
            .await?;

        Ok(profile)
    }
}

use crate::directory::{DirectoryUser, Guild, GuildDirectory, GuildMember};
use crate::error::{IdentityError, IdentityErrorExt};
use lct_domain::config::DiscordConfig;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Discord REST API client for the OAuth2 sign-in flow.
#[derive(Debug, Clone)]
pub struct DiscordDirectory {
    client: Client,
    api_base: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl DiscordDirectory {
    /// # Errors
    /// [`IdentityError::Config`] when the client id or secret is missing.
    pub fn new(client: Client, config: &DiscordConfig) -> Result<Self, IdentityError> {
        let client_id = required(&config.client_id, "security.discord.client_id")?;
        let client_secret = required(&config.client_secret, "security.discord.client_secret")?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            client_id,
            client_secret,
            redirect_uri: config.redirect_uri.clone(),
        })
    }

    /// Shared HTTP client for provider calls.
    ///
    /// # Errors
    /// [`IdentityError::Upstream`] when the TLS backend cannot be initialised.
    pub fn client() -> Result<Client, IdentityError> {
        Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build identity HTTP client")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, IdentityError> {
        let url = format!("{}{path}", self.api_base);
        let resp = self.client.get(&url).bearer_auth(token).send().await.context(path.to_owned())?;
        success(resp, path)?.json().await.context(path.to_owned())
    }
}

impl GuildDirectory for DiscordDirectory {
    async fn exchange_code(&self, code: &str) -> Result<String, IdentityError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];
        let url = format!("{}/oauth2/token", self.api_base);
        let resp = self.client.post(url).form(&params).send().await.context("/oauth2/token")?;
        let token: TokenResponse = success(resp, "/oauth2/token")?.json().await.context("/oauth2/token")?;
        Ok(token.access_token)
    }

    async fn current_user(&self, access_token: &str) -> Result<DirectoryUser, IdentityError> {
        self.get_json("/users/@me", access_token).await
    }

    async fn guilds(&self, access_token: &str) -> Result<Vec<Guild>, IdentityError> {
        self.get_json("/users/@me/guilds", access_token).await
    }

    async fn member(&self, access_token: &str, guild_id: &str) -> Result<GuildMember, IdentityError> {
        self.get_json(&format!("/users/@me/guilds/{guild_id}/member"), access_token).await
    }
}

/// Discord authorize URL that starts the sign-in flow.
///
/// # Errors
/// [`IdentityError::Config`] when the client id is missing or the URL is invalid.
pub fn authorize_url(config: &DiscordConfig) -> Result<String, IdentityError> {
    let client_id = required(&config.client_id, "security.discord.client_id")?;
    let scope = config.scopes.join(" ");
    let url = Url::parse_with_params(
        &config.authorize_url,
        [
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| IdentityError::config(format!("invalid authorize_url: {e}")))?;
    Ok(url.into())
}

fn required(value: &str, key: &'static str) -> Result<String, IdentityError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(IdentityError::Config { message: "value is required".into(), context: Some(key.into()) });
    }
    Ok(value.to_owned())
}

fn success(resp: Response, path: &str) -> Result<Response, IdentityError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(IdentityError::UpstreamStatus { status: status.as_u16(), context: Some(path.to_owned().into()) })
    }
}

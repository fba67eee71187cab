//! Identity feature slice.
//!
//! Sign-in is delegated to Discord: the callback trades the authorization code for
//! an access token, requires membership in the configured guild, reads the member's
//! roles and answers with a signed session token.

mod directory;
mod discord;
mod error;
mod gate;
#[cfg(feature = "server")]
pub mod server;
mod session;

pub use directory::{DirectoryUser, Guild, GuildDirectory, GuildMember};
pub use discord::{DiscordDirectory, authorize_url};
pub use error::{IdentityError, IdentityErrorExt};
pub use gate::{GuildGate, RejectReason, SignInDecision};
pub use session::{Session, SessionClaims, SessionIssuer, SessionUser};

use lct_kernel::domain::config::{ApiConfig, DiscordConfig, JwtConfig};
use lct_kernel::domain::registry::InitializedSlice;

/// Identity feature state.
///
/// Credentials are validated per sign-in so the rest of the API keeps serving when
/// Discord is not configured.
#[lct_derive::lct_slice]
pub struct Identity {
    pub client: reqwest::Client,
    pub discord: DiscordConfig,
    pub jwt: JwtConfig,
}

impl Identity {
    /// # Errors
    /// [`IdentityError::Config`] for incomplete Discord or JWT settings.
    pub fn gate(&self) -> Result<GuildGate<DiscordDirectory>, IdentityError> {
        GuildGate::discord(self.client.clone(), &self.discord, &self.jwt)
    }

    /// # Errors
    /// [`IdentityError::Config`] when the client id is missing.
    pub fn authorize_url(&self) -> Result<String, IdentityError> {
        authorize_url(&self.discord)
    }
}

/// Initialize the identity feature from the `[security]` section.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, IdentityError> {
    let security = &config.security;
    if security.discord.client_id.trim().is_empty() || security.discord.guild_id.trim().is_empty() {
        tracing::warn!("Discord sign-in is not configured; auth endpoints will report errors");
    }
    if security.jwt.secret.is_empty() {
        tracing::warn!("security.jwt.secret is not set; sign-in will be refused");
    }

    let slice = Identity::new(IdentityInner {
        client: DiscordDirectory::client()?,
        discord: security.discord.clone(),
        jwt: security.jwt.clone(),
    });

    tracing::info!("Identity slice initialized");
    Ok(InitializedSlice::new(slice))
}

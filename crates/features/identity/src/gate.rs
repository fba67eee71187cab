//! Guild-gated sign-in: token, profile, guild membership, roles.

use crate::directory::GuildDirectory;
use crate::discord::DiscordDirectory;
use crate::error::IdentityError;
use crate::session::{Session, SessionIssuer};
use lct_domain::config::{DiscordConfig, JwtConfig};
use tracing::{info, warn};

/// Why a sign-in was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The guild list could not be read with the user's token.
    GuildsUnavailable,
    /// The user is not a member of the configured guild.
    NotAMember,
}

impl RejectReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::GuildsUnavailable => "Guild membership could not be verified",
            Self::NotAMember => "Membership in the required guild is needed to sign in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInDecision {
    Allowed(Session),
    Rejected(RejectReason),
}

/// Sequential sign-in pipeline over a [`GuildDirectory`]; each step runs only when
/// the previous one succeeded.
#[derive(Debug)]
pub struct GuildGate<D> {
    directory: D,
    guild_id: String,
    issuer: SessionIssuer,
}

impl<D: GuildDirectory> GuildGate<D> {
    /// # Errors
    /// [`IdentityError::Config`] when `guild_id` is empty.
    pub fn new(directory: D, guild_id: &str, issuer: SessionIssuer) -> Result<Self, IdentityError> {
        let guild_id = guild_id.trim();
        if guild_id.is_empty() {
            return Err(IdentityError::Config {
                message: "value is required".into(),
                context: Some("security.discord.guild_id".into()),
            });
        }
        Ok(Self { directory, guild_id: guild_id.to_owned(), issuer })
    }

    /// Runs the pipeline for an authorization `code`.
    ///
    /// Rejections are decisions, not errors: no session is issued for them.
    ///
    /// # Errors
    /// * [`IdentityError::Validation`] for a blank code.
    /// * Provider errors from the token exchange and profile steps.
    pub async fn sign_in(&self, code: &str) -> Result<SignInDecision, IdentityError> {
        if code.trim().is_empty() {
            return Err(IdentityError::Validation {
                message: "authorization code is required".into(),
                context: None,
            });
        }

        let token = self.directory.exchange_code(code.trim()).await?;
        let user = self.directory.current_user(&token).await?;

        let guilds = match self.directory.guilds(&token).await {
            Ok(guilds) => guilds,
            Err(IdentityError::UpstreamStatus { status, .. }) => {
                warn!(user = %user.id, status, "Guild list unavailable, rejecting sign-in");
                return Ok(SignInDecision::Rejected(RejectReason::GuildsUnavailable));
            },
            Err(e) => return Err(e),
        };

        let Some(guild) = guilds.into_iter().find(|guild| guild.id == self.guild_id) else {
            info!(user = %user.id, "Sign-in rejected: not a guild member");
            return Ok(SignInDecision::Rejected(RejectReason::NotAMember));
        };

        let roles = match self.directory.member(&token, &self.guild_id).await {
            Ok(member) => member.roles,
            Err(e) => {
                warn!(user = %user.id, error = %e, "Guild role lookup failed, continuing without roles");
                Vec::new()
            },
        };

        let session = self.issuer.issue(&user, &guild.name, roles)?;
        info!(user = %user.id, roles = session.user.roles.len(), "Sign-in allowed");
        Ok(SignInDecision::Allowed(session))
    }
}

impl GuildGate<DiscordDirectory> {
    /// Discord-backed gate from the `[security]` settings.
    ///
    /// # Errors
    /// [`IdentityError::Config`] for missing credentials, guild id or JWT secret.
    pub fn discord(
        client: reqwest::Client,
        discord: &DiscordConfig,
        jwt: &JwtConfig,
    ) -> Result<Self, IdentityError> {
        Self::new(DiscordDirectory::new(client, discord)?, &discord.guild_id, SessionIssuer::new(jwt)?)
    }
}

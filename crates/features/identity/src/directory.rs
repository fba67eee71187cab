//! The identity provider as seen by the sign-in gate.

use crate::error::IdentityError;
use serde::Deserialize;
use std::future::Future;

/// Account behind an access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// A guild the account belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

/// Membership of the account in one guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub nick: Option<String>,
}

/// Calls made on behalf of the signing-in user, in pipeline order.
///
/// A non-success HTTP status must be reported as [`IdentityError::UpstreamStatus`].
pub trait GuildDirectory: Send + Sync {
    /// Trades an authorization code for an access token.
    fn exchange_code(&self, code: &str)
    -> impl Future<Output = Result<String, IdentityError>> + Send;

    fn current_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<DirectoryUser, IdentityError>> + Send;

    fn guilds(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Vec<Guild>, IdentityError>> + Send;

    fn member(
        &self,
        access_token: &str,
        guild_id: &str,
    ) -> impl Future<Output = Result<GuildMember, IdentityError>> + Send;
}

impl<T: GuildDirectory> GuildDirectory for &T {
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<String, IdentityError>> + Send {
        (**self).exchange_code(code)
    }

    fn current_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<DirectoryUser, IdentityError>> + Send {
        (**self).current_user(access_token)
    }

    fn guilds(&self, access_token: &str) -> impl Future<Output = Result<Vec<Guild>, IdentityError>> + Send {
        (**self).guilds(access_token)
    }

    fn member(
        &self,
        access_token: &str,
        guild_id: &str,
    ) -> impl Future<Output = Result<GuildMember, IdentityError>> + Send {
        (**self).member(access_token, guild_id)
    }
}

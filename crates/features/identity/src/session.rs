//! Signed session tokens handed to the client after a successful sign-in.

use crate::directory::DirectoryUser;
use crate::error::{IdentityError, IdentityErrorExt};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lct_derive::api_model;
use lct_domain::config::JwtConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// JWT claims of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity-provider user id.
    pub sub: String,
    pub name: String,
    pub guild_name: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

#[api_model(rename_all = "snake_case")]
#[derive(Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub guild_name: String,
    /// Guild role ids; empty when the role lookup failed.
    pub roles: Vec<String>,
}

/// Result of a successful sign-in.
#[api_model(rename_all = "snake_case")]
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub token_type: String,
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: u64,
    pub user: SessionUser,
}

/// HS256 signer/verifier for session tokens.
#[derive(Clone)]
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl_seconds: u64,
}

impl fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl SessionIssuer {
    /// # Errors
    /// [`IdentityError::Config`] for an empty secret or a zero lifetime.
    pub fn new(config: &JwtConfig) -> Result<Self, IdentityError> {
        if config.secret.is_empty() {
            return Err(IdentityError::config("security.jwt.secret is required"));
        }
        if config.ttl_seconds == 0 {
            return Err(IdentityError::config("security.jwt.ttl_seconds must be positive"));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_seconds: config.ttl_seconds,
        })
    }

    /// Signs a session for `user`, a member of `guild_name` holding `roles`.
    ///
    /// # Errors
    /// [`IdentityError::Token`] if signing fails.
    pub fn issue(
        &self,
        user: &DirectoryUser,
        guild_name: &str,
        roles: Vec<String>,
    ) -> Result<Session, IdentityError> {
        let now = jsonwebtoken::get_current_timestamp();
        let name = user.global_name.clone().unwrap_or_else(|| user.username.clone());
        let claims = SessionClaims {
            sub: user.id.clone(),
            name: name.clone(),
            guild_name: guild_name.to_owned(),
            roles,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("Failed to sign session")?;

        Ok(Session {
            token,
            token_type: "Bearer".to_owned(),
            expires_at: claims.exp,
            user: SessionUser {
                id: claims.sub,
                name,
                avatar: user.avatar.clone(),
                guild_name: claims.guild_name,
                roles: claims.roles,
            },
        })
    }

    /// Checks signature, issuer and expiry.
    ///
    /// # Errors
    /// [`IdentityError::Token`] for invalid or expired tokens.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, IdentityError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);

        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .context("Invalid session token")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt() -> JwtConfig {
        JwtConfig { secret: "unit-test-secret".to_owned(), ..JwtConfig::default() }
    }

    fn user() -> DirectoryUser {
        DirectoryUser {
            id: "42".to_owned(),
            username: "mira".to_owned(),
            global_name: Some("Mira".to_owned()),
            avatar: None,
        }
    }

    #[test]
    fn issued_session_verifies() {
        let issuer = SessionIssuer::new(&jwt()).unwrap();
        let session = issuer.issue(&user(), "Lyrian Chronicles", vec!["r1".to_owned()]).unwrap();

        let claims = issuer.verify(&session.token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "Mira");
        assert_eq!(claims.roles, ["r1"]);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(session.expires_at, claims.exp);
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let issuer = SessionIssuer::new(&jwt()).unwrap();
        let other = SessionIssuer::new(&JwtConfig { issuer: "other".to_owned(), ..jwt() })
            .unwrap();
        let session = other.issue(&user(), "g", Vec::new()).unwrap();

        assert!(matches!(issuer.verify(&session.token), Err(IdentityError::Token { .. })));
    }

    #[test]
    fn default_config_has_no_signing_key() {
        assert!(matches!(SessionIssuer::new(&JwtConfig::default()), Err(IdentityError::Config { .. })));
    }

    #[test]
    fn token_signed_with_another_key_is_rejected() {
        let issuer = SessionIssuer::new(&jwt()).unwrap();
        let forger = SessionIssuer::new(&JwtConfig { secret: "guessed".to_owned(), ..jwt() }).unwrap();
        let forged = forger.issue(&user(), "g", vec!["admin".to_owned()]).unwrap();

        assert!(matches!(issuer.verify(&forged.token), Err(IdentityError::Token { .. })));
    }
}

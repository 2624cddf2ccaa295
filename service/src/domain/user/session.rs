//! [`Session`] definitions.

use std::time::Duration;

use common::{unit::Expiration, DateTime, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{user, User};

/// User session.
///
/// Stateless: everything needed to verify a [`Session`] is encoded in its
/// [`Token`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    /// [`user::Name`] of the [`User`] this [`Session`] belongs to.
    pub name: user::Name,

    /// [`user::Login`] of the [`User`] this [`Session`] belongs to.
    pub login: user::Login,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Creates a new [`Session`] of the provided [`User`], issued at the
    /// provided [`DateTime`] and living for the provided `ttl`.
    ///
    /// [`Session::expires_at`] is truncated to whole seconds, as this is the
    /// precision of its [`Token`] representation.
    #[must_use]
    pub fn new(user: &User, issued_at: DateTime, ttl: Duration) -> Self {
        let expires_at = issued_at + ttl;
        Self {
            name: user.name.clone(),
            login: user.login.clone(),
            expires_at: DateTime::from_unix_timestamp(
                expires_at.unix_timestamp(),
            )
            .unwrap_or(expires_at)
            .coerce(),
        }
    }

    /// Indicates whether this [`Session`] is expired at the provided
    /// [`DateTime`].
    #[must_use]
    pub fn is_expired_at(&self, at: DateTime) -> bool {
        at >= self.expires_at.coerce()
    }

    /// Encodes this [`Session`] into a [`Token`] signed with the provided
    /// [`EncodingKey`].
    ///
    /// # Errors
    ///
    /// If [`jsonwebtoken`] fails to encode this [`Session`].
    pub fn encode(
        &self,
        key: &EncodingKey,
    ) -> Result<Token, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&Header::default(), self, key).map(Token)
    }
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, FromStr, PartialEq)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Decodes the [`Session`] from this [`Token`], checking its signature
    /// with the provided [`DecodingKey`].
    ///
    /// Expiration is not checked here, see [`Session::is_expired_at()`].
    ///
    /// # Errors
    ///
    /// If this [`Token`] is malformed or its signature doesn't match.
    pub fn decode(
        &self,
        key: &DecodingKey,
    ) -> Result<Session, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.validate_exp = false;

        jsonwebtoken::decode::<Session>(&self.0, key, &validation)
            .map(|data| data.claims)
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, Expiration)>;

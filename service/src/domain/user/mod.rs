//! [`User`] definitions.

pub mod session;

use derive_more::{AsRef, Display, From};
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

pub use self::session::Session;

/// Registered user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Login`] of this [`User`].
    ///
    /// Unique among all [`User`]s.
    pub login: Login,

    /// [`PasswordHash`] of this [`User`].
    #[serde(rename = "password")]
    pub password_hash: PasswordHash,
}

/// Name of a [`User`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is not empty.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.is_empty()).then_some(Self(name))
    }
}

/// Login of a [`User`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct Login(String);

impl Login {
    /// Creates a new [`Login`] if the given `login` is not empty.
    #[must_use]
    pub fn new(login: impl Into<String>) -> Option<Self> {
        let login = login.into();
        (!login.is_empty()).then_some(Self(login))
    }
}

/// Plain password of a [`User`].
///
/// Never stored, only its [`PasswordHash`] is.
#[derive(Clone, Debug, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Minimal number of characters in a [`Password`] accepted on
    /// registration.
    pub const MIN_LENGTH: usize = 8;

    /// Indicates whether this [`Password`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indicates whether this [`Password`] is shorter than
    /// [`Password::MIN_LENGTH`] characters.
    #[must_use]
    pub fn is_too_short(&self) -> bool {
        self.0.chars().count() < Self::MIN_LENGTH
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Password hash of a [`User`].
///
/// Hex-encoded SHA-256 digest of a [`Password`].
#[derive(Clone, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Creates a new [`PasswordHash`] from the given [`Password`].
    #[must_use]
    pub fn new(password: &Password) -> Self {
        Self(hex::encode(Sha256::digest(password.0.as_bytes())))
    }
}

//! [`Command`] for authorizing a [`Session`].

use common::DateTime;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`] by its [`session::Token`].
///
/// Only the signature and expiration of the [`session::Token`] are checked:
/// the [`User`] it was issued for is not looked up.
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeUserSession> for Service<Db> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        let session = token
            .decode(&self.config().jwt_decoding_key)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        if session.is_expired_at(DateTime::now()) {
            return Err(tracerr::new!(E::Expired(session.expires_at)));
        }

        Ok(session)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),

    /// [`Session`] has expired.
    #[display("`Session` expired at {}", _0.to_rfc3339())]
    #[from(ignore)]
    Expired(#[error(not(source))] session::ExpirationDateTime),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::{
        command::spec::service,
        domain::{
            user::{Login, Name, PasswordHash, Session},
            User,
        },
        Config,
    };

    use super::{AuthorizeUserSession, Command as _, ExecutionError as E};

    fn user() -> User {
        User {
            name: Name::new("Ann").unwrap(),
            login: Login::new("ann").unwrap(),
            password_hash: PasswordHash::new(&"qwerty123".into()),
        }
    }

    #[tokio::test]
    async fn authorizes_fresh_token() {
        let config = Config::with_secret("secret");
        let token = Session::new(&user(), DateTime::now(), config.session_ttl)
            .encode(&config.jwt_encoding_key)
            .unwrap();
        let (svc, _dir) = service(config).await;

        let session = svc.execute(AuthorizeUserSession { token }).await.unwrap();
        assert_eq!(session.login.as_ref(), "ann");
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let config = Config::with_secret("secret");
        let issued_at = DateTime::from_unix_timestamp(
            DateTime::now().unix_timestamp() - (12 * 60 * 60 + 60),
        )
        .unwrap();
        let token = Session::new(&user(), issued_at, config.session_ttl)
            .encode(&config.jwt_encoding_key)
            .unwrap();
        let (svc, _dir) = service(config).await;

        let err = svc.execute(AuthorizeUserSession { token }).await.unwrap_err();
        assert!(matches!(err.as_ref(), E::Expired(_)));
    }

    #[tokio::test]
    async fn rejects_foreign_token() {
        let token = Session::new(&user(), DateTime::now(), Duration::from_secs(60))
            .encode(&Config::with_secret("other").jwt_encoding_key)
            .unwrap();
        let (svc, _dir) = service(Config::with_secret("secret")).await;

        let err = svc.execute(AuthorizeUserSession { token }).await.unwrap_err();
        assert!(matches!(err.as_ref(), E::JsonWebTokenDecodeError(_)));

        let err = svc
            .execute(AuthorizeUserSession {
                token: "garbage".parse().unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), E::JsonWebTokenDecodeError(_)));
    }
}

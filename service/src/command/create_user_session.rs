//! [`Command`] for creating a [`Session`].

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{session::Token, Login, Password};
use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`] by [`User`] credentials.
#[derive(Clone, Debug)]
pub struct CreateUserSession {
    /// [`Login`] of a [`User`].
    pub login: String,

    /// [`Password`] of a [`User`].
    pub password: SecretBox<user::Password>,
}

/// Mode of matching [`User`] credentials when creating a [`Session`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CredentialsMatching {
    /// Both [`Login`] and [`Password`] must belong to the same [`User`].
    #[default]
    SameUser,

    /// [`Login`] must belong to some [`User`], and [`Password`] must belong to
    /// some [`User`], not necessarily the same one.
    ///
    /// Allows to log in as any [`User`] knowing the [`Password`] of any other
    /// [`User`], so must only be used for compatibility with existing
    /// clients.
    AnyUser,
}

/// Output of [`CreateUserSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: session::Token,

    /// [`User`] whose [`Session`] has been created.
    pub user: User,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<Db> Command<CreateUserSession> for Service<Db>
where
    Db: Database<
        Select<By<Vec<User>, ()>>,
        Ok = Vec<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUserSession { login, password } = cmd;
        let hash = user::PasswordHash::new(password.expose_secret());

        let users = self
            .database()
            .execute(Select(By::<Vec<User>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let user = match self.config().credentials_matching {
            CredentialsMatching::SameUser => users.into_iter().find(|u| {
                AsRef::<str>::as_ref(&u.login) == login
                    && u.password_hash == hash
            }),
            CredentialsMatching::AnyUser => {
                if users.iter().any(|u| u.password_hash == hash) {
                    users
                        .into_iter()
                        .find(|u| AsRef::<str>::as_ref(&u.login) == login)
                } else {
                    None
                }
            }
        }
        .ok_or_else(|| tracerr::new!(E::WrongCredentials))?;

        let session =
            Session::new(&user, DateTime::now(), self.config().session_ttl);
        let token = session
            .encode(&self.config().jwt_encoding_key)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(Output {
            token,
            user,
            expires_at: session.expires_at,
        })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// Provided credentials don't match any [`User`].
    #[display("Wrong `User` credentials")]
    WrongCredentials,
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::{spec::service, CreateUser},
        Config,
    };

    use super::{
        Command as _, CreateUserSession, CredentialsMatching,
        ExecutionError as E,
    };

    fn register(name: &str, login: &str, password: &str) -> CreateUser {
        let password = password.to_owned();
        CreateUser {
            name: name.into(),
            login: login.into(),
            password: SecretBox::init_with(move || password.into()),
        }
    }

    fn login(login: &str, password: &str) -> CreateUserSession {
        let password = password.to_owned();
        CreateUserSession {
            login: login.into(),
            password: SecretBox::init_with(move || password.into()),
        }
    }

    fn config(matching: CredentialsMatching) -> Config {
        Config {
            credentials_matching: matching,
            ..Config::with_secret("secret")
        }
    }

    #[tokio::test]
    async fn issues_token_for_valid_credentials() {
        let config = config(CredentialsMatching::SameUser);
        let key = config.jwt_decoding_key.clone();
        let (svc, _dir) = service(config).await;
        _ = svc.execute(register("Ann", "ann", "qwerty123")).await.unwrap();

        let out = svc.execute(login("ann", "qwerty123")).await.unwrap();

        assert_eq!(out.user.login.as_ref(), "ann");
        let session = out.token.decode(&key).unwrap();
        assert_eq!(session.login.as_ref(), "ann");
        assert_eq!(session.name.as_ref(), "Ann");
        assert_eq!(session.expires_at, out.expires_at);
    }

    #[tokio::test]
    async fn rejects_wrong_credentials() {
        let (svc, _dir) = service(config(CredentialsMatching::SameUser)).await;
        _ = svc.execute(register("Ann", "ann", "qwerty123")).await.unwrap();

        for (l, p) in [("ann", "qwerty124"), ("bob", "qwerty123"), ("", "")] {
            let err = svc.execute(login(l, p)).await.unwrap_err();
            assert!(matches!(err.as_ref(), E::WrongCredentials));
        }
    }

    #[tokio::test]
    async fn rejects_credentials_of_different_users() {
        let (svc, _dir) = service(config(CredentialsMatching::SameUser)).await;
        _ = svc.execute(register("Ann", "ann", "qwerty123")).await.unwrap();
        _ = svc.execute(register("Bob", "bob", "password")).await.unwrap();

        let err = svc.execute(login("ann", "password")).await.unwrap_err();
        assert!(matches!(err.as_ref(), E::WrongCredentials));
    }

    /// Known divergence: [`CredentialsMatching::AnyUser`] accepts a `Login`
    /// of one `User` together with a `Password` of another one.
    #[tokio::test]
    async fn accepts_credentials_of_different_users_in_any_user_mode() {
        let (svc, _dir) = service(config(CredentialsMatching::AnyUser)).await;
        _ = svc.execute(register("Ann", "ann", "qwerty123")).await.unwrap();
        _ = svc.execute(register("Bob", "bob", "password")).await.unwrap();

        let out = svc.execute(login("ann", "password")).await.unwrap();
        assert_eq!(out.user.name.as_ref(), "Ann");

        let err = svc.execute(login("carl", "password")).await.unwrap_err();
        assert!(matches!(err.as_ref(), E::WrongCredentials));
        let err = svc.execute(login("ann", "unknown1")).await.unwrap_err();
        assert!(matches!(err.as_ref(), E::WrongCredentials));
    }
}

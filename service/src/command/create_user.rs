//! [`Command`] for creating a new [`User`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Login, Name, Password};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: String,

    /// [`Login`] of a new [`User`].
    pub login: String,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Vec<User>, ()>>,
            Ok = Vec<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            login,
            password,
        } = cmd;

        let (Some(name), Some(login)) =
            (user::Name::new(name), user::Login::new(login))
        else {
            return Err(tracerr::new!(E::EmptyFields));
        };
        let password = password.expose_secret();
        if password.is_empty() {
            return Err(tracerr::new!(E::EmptyFields));
        }
        if password.is_too_short() {
            return Err(tracerr::new!(E::PasswordTooShort));
        }

        // Hold other writers off until the new `User` is stored, so the
        // same `Login` cannot be occupied twice.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let occupied = tx
            .execute(Select(By::<Vec<User>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .iter()
            .any(|u| u.login == login);
        if occupied {
            return Err(tracerr::new!(E::LoginOccupied(login)));
        }

        let user = User {
            name,
            login,
            password_hash: user::PasswordHash::new(password),
        };
        tx.execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Some of the required fields are empty.
    #[display("Not all the required fields are filled")]
    EmptyFields,

    /// [`user::Login`] is already occupied.
    #[display("`{_0}` login is occupied")]
    LoginOccupied(#[error(not(source))] user::Login),

    /// [`user::Password`] is shorter than [`user::Password::MIN_LENGTH`].
    #[display("`Password` is too short")]
    PasswordTooShort,
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use secrecy::SecretBox;

    use crate::{
        command::spec::service, domain::User, infra::Database as _, Config,
    };

    use super::{CreateUser, ExecutionError as E};

    fn cmd(name: &str, login: &str, password: &str) -> CreateUser {
        let password = password.to_owned();
        CreateUser {
            name: name.into(),
            login: login.into(),
            password: SecretBox::init_with(move || password.into()),
        }
    }

    #[tokio::test]
    async fn occupies_login_once() {
        let (svc, _dir) = service(Config::with_secret("secret")).await;

        let user = svc.execute(cmd("Ann", "ann", "qwerty123")).await.unwrap();
        assert_eq!(user.login.as_ref(), "ann");
        assert_ne!(user.password_hash.to_string(), "qwerty123");

        let err = svc
            .execute(cmd("Another Ann", "ann", "12345678"))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), E::LoginOccupied(l) if l.as_ref() == "ann"));

        let users = svc
            .database()
            .execute(Select(By::<Vec<User>, _>::new(())))
            .await
            .unwrap();
        assert_eq!(users, vec![user]);
    }

    #[tokio::test]
    async fn requires_all_fields() {
        let (svc, _dir) = service(Config::with_secret("secret")).await;

        for (name, login, password) in [
            ("", "ann", "qwerty123"),
            ("Ann", "", "qwerty123"),
            ("Ann", "ann", ""),
            ("", "", ""),
        ] {
            let err = svc.execute(cmd(name, login, password)).await.unwrap_err();
            assert!(matches!(err.as_ref(), E::EmptyFields));
        }
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let (svc, _dir) = service(Config::with_secret("secret")).await;

        for password in ["1", "1234567", "qwerty1"] {
            let err = svc
                .execute(cmd("Ann", "ann", password))
                .await
                .unwrap_err();
            assert!(matches!(err.as_ref(), E::PasswordTooShort));
        }

        assert!(svc.execute(cmd("Ann", "ann", "12345678")).await.is_ok());
    }

    #[tokio::test]
    async fn concurrent_registrations_occupy_login_once() {
        let (svc, _dir) = service(Config::with_secret("secret")).await;

        let (a, b) = tokio::join!(
            svc.execute(cmd("Ann", "ann", "qwerty123")),
            svc.execute(cmd("Ann", "ann", "qwerty123")),
        );
        assert!(a.is_ok() != b.is_ok());
    }
}

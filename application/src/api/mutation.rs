//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use secrecy::SecretBox;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Registers a new `User` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMPTY_FIELDS` - not all the fields are filled;
    /// - `PASSWORD_TOO_SHORT` - provided password is shorter than 8
    ///                          characters;
    /// - `LOGIN_OCCUPIED` - provided login is occupied by another `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "registration",
            login = ?input.as_ref().and_then(|i| i.login.as_deref()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn registration(
        input: Option<api::user::UserInput>,
        ctx: &Context,
    ) -> api::Response {
        let api::user::UserInput {
            name,
            login,
            password,
            ..
        } = input.unwrap_or_default();
        let password = password.unwrap_or_default();

        ctx.service()
            .execute(command::CreateUser {
                name: name.unwrap_or_default(),
                login: login.unwrap_or_default(),
                password: SecretBox::init_with(move || password.into()),
            })
            .await
            .map_or_else(
                |e| e.into_error().into(),
                |_| api::Response::ok_with("Success!"),
            )
    }

    /// Authorizes a `User` with the provided credentials.
    ///
    /// On success the session token is set as the `authorization` cookie.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials don't match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "authorization",
            login = ?input.as_ref().and_then(|i| i.login.as_deref()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn authorization(
        input: Option<api::user::CredentialsInput>,
        ctx: &Context,
    ) -> api::Response {
        let (login, password) = input
            .map(|i| (i.login, i.password))
            .unwrap_or_default();
        let password = password.unwrap_or_default();

        let output = match ctx
            .service()
            .execute(command::CreateUserSession {
                login: login.unwrap_or_default(),
                password: SecretBox::init_with(move || password.into()),
            })
            .await
        {
            Ok(out) => out,
            Err(e) => return e.into_error().into(),
        };

        ctx.set_issued_session(Session {
            name: output.user.name,
            login: output.user.login,
            token: output.token,
            expires_at: output.expires_at.coerce(),
        });

        api::Response::ok()
    }

    /// Creates a new `Task`, replacing the existing one with the same `id`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TASK_REQUIRED` - no `task` is provided.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "create",
            id = ?input
                .as_ref()
                .and_then(|i| i.task.as_ref())
                .and_then(|t| t.id.as_deref()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create(
        input: Option<api::task::CreatedDataInput>,
        ctx: &Context,
    ) -> Result<api::Response, Error> {
        _ = ctx.current_session().await?;

        let Some(task) = input.and_then(|i| i.task) else {
            return Ok(Error::from(api::InputError::TaskRequired).into());
        };

        Ok(ctx
            .service()
            .execute(command::CreateTask {
                task: domain::Task::from(task),
            })
            .await
            .map_or_else(|e| e.into_error().into(), |_| api::Response::ok()))
    }

    /// Deletes the `Task` with the provided `id`.
    ///
    /// Deleting a non-existent `Task` succeeds.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ID_REQUIRED` - no `id` is provided.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "delete",
            id = ?input.as_ref().and_then(|i| i.id.as_deref()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete(
        input: Option<api::task::IdDataInput>,
        ctx: &Context,
    ) -> Result<api::Response, Error> {
        _ = ctx.current_session().await?;

        let Some(id) = input.and_then(|i| i.id) else {
            return Ok(Error::from(api::InputError::IdRequired).into());
        };

        Ok(ctx
            .service()
            .execute(command::DeleteTask { id: id.into() })
            .await
            .map_or_else(|e| e.into_error().into(), |()| api::Response::ok()))
    }

    /// Updates the content, status and date of the `Task` with the provided
    /// `id`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TASK_REQUIRED` - no `task` is provided;
    /// - `ID_REQUIRED` - no `id` of the `task` is provided;
    /// - `TASK_NOT_EXISTS` - the `Task` with the provided `id` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "update",
            id = ?input
                .as_ref()
                .and_then(|i| i.task.as_ref())
                .and_then(|t| t.id.as_deref()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update(
        input: Option<api::task::UpdatedDataInput>,
        ctx: &Context,
    ) -> Result<api::Response, Error> {
        _ = ctx.current_session().await?;

        let Some(task) = input.and_then(|i| i.task) else {
            return Ok(Error::from(api::InputError::TaskRequired).into());
        };
        let Some(id) = task.id else {
            return Ok(Error::from(api::InputError::IdRequired).into());
        };

        Ok(ctx
            .service()
            .execute(command::UpdateTask {
                id: id.into(),
                content: task.content.unwrap_or_default(),
                status: task.status.unwrap_or_default(),
                date: task.date.unwrap_or_default(),
            })
            .await
            .map_or_else(|e| e.into_error().into(), |_| api::Response::ok()))
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmptyFields => Some(RegistrationError::EmptyFields.into()),
            Self::LoginOccupied(_) => {
                Some(RegistrationError::LoginOccupied.into())
            }
            Self::PasswordTooShort => {
                Some(RegistrationError::PasswordTooShort.into())
            }
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::WrongCredentials => {
                Some(AuthorizationError::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::update_task::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TaskNotExists(_) => {
                Some(api::query::TaskError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum RegistrationError {
        #[code = "EMPTY_FIELDS"]
        #[status = FORBIDDEN]
        #[message = "You should fill all fields!"]
        EmptyFields,

        #[code = "PASSWORD_TOO_SHORT"]
        #[status = FORBIDDEN]
        #[message = "Password should has length more than 7!"]
        PasswordTooShort,

        #[code = "LOGIN_OCCUPIED"]
        #[status = FORBIDDEN]
        #[message = "This login already exist!"]
        LoginOccupied,
    }
}

define_error! {
    enum AuthorizationError {
        #[code = "WRONG_CREDENTIALS"]
        #[status = BAD_REQUEST]
        #[message = "Incorrect login or password!"]
        WrongCredentials,
    }
}

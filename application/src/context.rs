//! [`Context`]-related definitions.

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use common::DateTime;
use juniper::{
    http::{GraphQLBatchResponse, GraphQLResponse},
    IntoFieldError as _,
};
use service::{
    command::{self, Command as _},
    domain::user::{self, session},
};
use tokio::sync::OnceCell;

use crate::{define_error, AsError, Error, JuniperResponse, Service};

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Parts of the HTTP request.
    parts: http::request::Parts,

    /// Current [`Session`] the HTTP request is authorized with.
    current_session: OnceCell<Session>,

    /// Authentication [`Error`] of the HTTP request, if it failed.
    auth_error: OnceCell<Error>,

    /// [`Session`] issued while executing the HTTP request.
    issued_session: OnceCell<Session>,
}

impl Context {
    /// Name of the cookie carrying a [`session::Token`].
    pub const TOKEN_COOKIE: &'static str = "authorization";

    /// Creates a new [`Context`] of the HTTP request with the provided
    /// [`http::request::Parts`].
    #[must_use]
    pub fn new(service: Service, parts: http::request::Parts) -> Self {
        Self {
            service,
            parts,
            current_session: OnceCell::new(),
            auth_error: OnceCell::new(),
            issued_session: OnceCell::new(),
        }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns the current [`Session`] for this [`Context`].
    ///
    /// The outcome is cached, so the [`session::Token`] is verified at most
    /// once per HTTP request.
    ///
    /// # Errors
    ///
    /// Errors if:
    /// - the current HTTP request carries no [`session::Token`];
    /// - the provided [`session::Token`] is invalid or expired.
    pub async fn current_session(&self) -> Result<Session, Error> {
        if let Some(e) = self.auth_error.get() {
            return Err(e.clone());
        }
        self.current_session
            .get_or_try_init(|| self.authenticate())
            .await
            .cloned()
            .map_err(|e| {
                _ = self.auth_error.set(e.clone());
                e
            })
    }

    /// Records the [`Session`] issued while executing the HTTP request.
    ///
    /// Only the first issued [`Session`] is kept.
    pub fn set_issued_session(&self, session: Session) {
        _ = self.issued_session.set(session);
    }

    /// Returns the [`Session`] issued while executing the HTTP request, if
    /// any.
    #[must_use]
    pub fn issued_session(&self) -> Option<&Session> {
        self.issued_session.get()
    }

    /// Extracts the [`session::Token`] from the HTTP request.
    ///
    /// The [`Context::TOKEN_COOKIE`] takes precedence over the
    /// `Authorization: Bearer` header.
    async fn token(&self) -> Option<session::Token> {
        if let Some(cookie) =
            CookieJar::from_headers(&self.parts.headers).get(Self::TOKEN_COOKIE)
        {
            return Some(cookie.value().to_owned().into());
        }
        self.parts
            .clone()
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| {
                bearer.token().to_owned().into()
            })
    }

    /// Performs the [`Session`] authentication.
    ///
    /// # Errors
    ///
    /// Errors if the provided [`session::Token`] is missing or invalid.
    async fn authenticate(&self) -> Result<Session, Error> {
        let token = self
            .token()
            .await
            .ok_or_else(|| Error::from(AuthError::AuthorizationRequired))?;

        self.service
            .execute(command::AuthorizeUserSession {
                token: token.clone(),
            })
            .await
            .map(|s| Session {
                name: s.name,
                login: s.login,
                token,
                expires_at: s.expires_at.coerce(),
            })
            .map_err(AsError::into_error)
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = JuniperResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().cloned().ok_or_else(|| {
                JuniperResponse {
                    status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
                    response: GraphQLBatchResponse::Single(
                        GraphQLResponse::error(
                            Error::internal(&"missing `Service` extension")
                                .into_field_error(),
                        ),
                    ),
                }
            })?;

        Ok(Self::new(service, parts.clone()))
    }
}

/// User session.
#[derive(Clone, Debug)]
pub struct Session {
    /// Name of the user this [`Session`] belongs to.
    pub name: user::Name,

    /// Login of the user this [`Session`] belongs to.
    pub login: user::Login,

    /// Authentication token.
    pub token: session::Token,

    /// [`DateTime`] when this [`Session`] expires.
    pub expires_at: DateTime,
}

impl AsError for command::authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::JsonWebTokenDecodeError(_) | Self::Expired(_) => {
                Some(AuthError::AuthorizationRequired.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,
    }
}

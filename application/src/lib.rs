//! Application provides GraphQL API of the task tracker [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
mod context;
pub mod error;
pub mod guard;

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, Expiration};
use derive_more::Debug;
use juniper::{http::GraphQLBatchResponse, DefaultScalarValue, ScalarValue};
use juniper_axum::extract::JuniperRequest;
// Used in binary.
use axum_client_ip as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    context::{Context, Session},
    error::{AsError, Error},
    guard::Access,
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Fs>;

/// [`juniper`] GraphQL response.
#[derive(Debug)]
pub struct JuniperResponse<S = DefaultScalarValue>
where
    S: ScalarValue,
{
    /// Status code of the response, if it contains errors.
    pub status_code: http::StatusCode,

    /// Underlying GraphQL response.
    #[debug(skip)]
    pub response: GraphQLBatchResponse<S>,
}

impl<S> IntoResponse for JuniperResponse<S>
where
    S: ScalarValue,
{
    fn into_response(self) -> Response {
        let Self {
            status_code,
            response,
        } = self;

        if response.is_ok() {
            Json(response).into_response()
        } else {
            (status_code, Json(response)).into_response()
        }
    }
}

/// Creates a new [`Router`] serving the GraphQL API with the provided
/// [`Service`].
pub fn router(service: Service) -> Router {
    Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .layer(Extension(Arc::new(api::schema())))
        .layer(Extension(service))
}

/// GraphQL API handler.
///
/// Rejects [`Access::Guarded`] requests without a valid [`Session`] before
/// executing any of their operations, and sets the cookie of a [`Session`]
/// issued during the execution.
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    context: Context,
    jar: CookieJar,
    JuniperRequest(gql_request): JuniperRequest,
) -> Response {
    if Access::of(&gql_request, &schema.schema) == Access::Guarded {
        if let Err(e) = context.current_session().await {
            return guard::unauthorized(e);
        }
    }

    let response = JuniperResponse {
        status_code: http::StatusCode::BAD_REQUEST,
        response: gql_request.execute(&*schema, &context).await,
    };

    let jar = match context.issued_session() {
        Some(session) => jar.add(
            Cookie::build((Context::TOKEN_COOKIE, session.token.to_string()))
                .http_only(true)
                .path("/")
                .expires(Expiration::DateTime(session.expires_at.into())),
        ),
        None => jar,
    };

    (jar, response).into_response()
}

//! Access guard of the GraphQL API.

use axum::{
    response::{IntoResponse as _, Response},
    Json,
};
use juniper::{
    executor::get_operation,
    http::{GraphQLBatchRequest, GraphQLRequest, GraphQLResponse},
    parser::parse_document_source,
    DefaultScalarValue, IntoFieldError as _, ScalarValue, SchemaType,
    Selection,
};

use crate::Error;

/// Kind of access a GraphQL operation requires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    /// Operation may be executed without a session.
    Exempt,

    /// Operation requires a valid session.
    Guarded,
}

impl Access {
    /// Names of the operations allowed without a session.
    ///
    /// An operation is [`Access::Exempt`] only if its `input.request`
    /// variable is one of these, and so is every root field it selects.
    pub const EXEMPT_REQUESTS: [&'static str; 2] =
        ["registration", "authorization"];

    /// Path the client is redirected to when a session is required.
    pub const REDIRECT_LOCATION: &'static str = "/authorization";

    /// Classifies the provided [`GraphQLBatchRequest`] against the provided
    /// [`SchemaType`].
    ///
    /// A batch is [`Access::Exempt`] only if all its operations are.
    #[must_use]
    pub fn of<S: ScalarValue>(
        request: &GraphQLBatchRequest<S>,
        schema: &SchemaType<'_, S>,
    ) -> Self {
        let exempt = |req: &GraphQLRequest<S>| {
            Self::is_declared_exempt(req)
                && Self::selects_only_exempt(req, schema)
        };
        let exempt = match request {
            GraphQLBatchRequest::Single(req) => exempt(req),
            GraphQLBatchRequest::Batch(reqs) => reqs.iter().all(exempt),
        };
        if exempt {
            Self::Exempt
        } else {
            Self::Guarded
        }
    }

    /// Checks whether the provided [`GraphQLRequest`] declares itself as a
    /// registration or authorization one.
    fn is_declared_exempt<S: ScalarValue>(
        request: &GraphQLRequest<S>,
    ) -> bool {
        request
            .variables()
            .get("input")
            .and_then(|input| {
                input
                    .to_object_value()?
                    .get("request")
                    .copied()?
                    .as_string_value()
            })
            .is_some_and(|r| Self::EXEMPT_REQUESTS.contains(&r))
    }

    /// Checks whether the operation to be executed by the provided
    /// [`GraphQLRequest`] selects only registration or authorization root
    /// fields.
    ///
    /// Unparsable documents and fragments at the root are never exempt.
    fn selects_only_exempt<S: ScalarValue>(
        request: &GraphQLRequest<S>,
        schema: &SchemaType<'_, S>,
    ) -> bool {
        let Ok(document) = parse_document_source(&request.query, schema)
        else {
            return false;
        };
        let Ok(operation) =
            get_operation(&document, request.operation_name.as_deref())
        else {
            return false;
        };
        operation.item.selection_set.iter().all(|sel| match sel {
            Selection::Field(f) => {
                Self::EXEMPT_REQUESTS.contains(&f.item.name.item)
            }
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => false,
        })
    }
}

/// Builds the response rejecting an unauthorized HTTP request with the
/// provided [`Error`].
#[must_use]
pub fn unauthorized(err: Error) -> Response {
    let status_code = err.status_code;
    (
        status_code,
        [(http::header::LOCATION, Access::REDIRECT_LOCATION)],
        Json(GraphQLResponse::<DefaultScalarValue>::error(
            err.into_field_error(),
        )),
    )
        .into_response()
}

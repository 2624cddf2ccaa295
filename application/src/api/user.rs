//! `User`-related definitions.

use juniper::GraphQLInputObject;

/// Input of the `registration` mutation.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
pub struct UserInput {
    /// Kind of the request.
    pub request: Option<String>,

    /// Name of the new `User`.
    pub name: Option<String>,

    /// Login of the new `User`.
    pub login: Option<String>,

    /// Password of the new `User`.
    pub password: Option<String>,
}

/// Input of the `authorization` mutation.
#[derive(Clone, Debug, GraphQLInputObject)]
pub struct CredentialsInput {
    /// Kind of the request.
    pub request: Option<String>,

    /// Login of the `User`.
    pub login: Option<String>,

    /// Password of the `User`.
    pub password: Option<String>,
}

//! GraphQL API definitions.

mod mutation;
mod query;
pub mod response;
pub mod task;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    mutation::Mutation,
    query::Query,
    response::{Response, TaskResponse, TasksResponse},
    task::Task,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

define_error! {
    enum InputError {
        #[code = "TASK_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "`Task` should be provided!"]
        TaskRequired,

        #[code = "ID_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "`Task` ID should be provided!"]
        IdRequired,
    }
}

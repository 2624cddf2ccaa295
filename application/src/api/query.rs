//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain::task, query, Query as _};

use crate::{api, define_error, AsError as _, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all the `Task`s whose content contains the provided
    /// `searchStr`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "getAllTasks",
            otel.name = Self::SPAN_NAME,
            search = ?input.as_ref().and_then(|i| i.search_str.as_deref()),
        ),
    )]
    pub async fn get_all_tasks(
        input: Option<api::task::SearchDataInput>,
        ctx: &Context,
    ) -> Result<api::TasksResponse, Error> {
        _ = ctx.current_session().await?;

        let search = input.and_then(|i| i.search_str).unwrap_or_default();
        Ok(ctx
            .service()
            .execute(query::tasks::Search::by(search.into()))
            .await
            .map(|tasks| tasks.into_iter().map(Into::into).collect::<Vec<_>>())
            .map_or_else(|e| e.into_error().into(), Into::into))
    }

    /// Returns the `Task` with the provided `id`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ID_REQUIRED` - no `id` is provided;
    /// - `TASK_NOT_EXISTS` - the `Task` with the provided `id` does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "getTask",
            id = ?input.as_ref().and_then(|i| i.id.as_deref()),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn get_task(
        input: Option<api::task::IdDataInput>,
        ctx: &Context,
    ) -> Result<api::TaskResponse, Error> {
        _ = ctx.current_session().await?;

        let Some(id) = input.and_then(|i| i.id) else {
            return Ok(Error::from(api::InputError::IdRequired).into());
        };
        let found = ctx
            .service()
            .execute(query::task::ById::by(task::Id::from(id)))
            .await;
        Ok(match found {
            Ok(Some(task)) => api::Task::from(task).into(),
            Ok(None) => Error::from(TaskError::NotExists).into(),
            Err(e) => e.into_error().into(),
        })
    }
}

define_error! {
    enum TaskError {
        #[code = "TASK_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Task` does not exist"]
        NotExists,
    }
}

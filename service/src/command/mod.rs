//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_task;
pub mod create_user;
pub mod create_user_session;
pub mod delete_task;
pub mod update_task;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, create_task::CreateTask,
    create_user::CreateUser, create_user_session::CreateUserSession,
    delete_task::DeleteTask, update_task::UpdateTask,
};

//! Domain definitions.

pub mod task;
pub mod user;

pub use self::{task::Task, user::User};

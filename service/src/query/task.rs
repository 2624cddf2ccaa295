//! [`Query`] collection related to a single [`Task`].

use common::operations::By;

use crate::domain::{task, Task};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Task`] by its [`task::Id`].
pub type ById = DatabaseQuery<By<Option<Task>, task::Id>>;

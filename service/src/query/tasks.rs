//! [`Query`] collection related to the multiple [`Task`]s.

use common::operations::By;

use crate::domain::{task, Task};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Searches [`Task`]s whose content contains the provided [`task::Search`].
pub type Search = DatabaseQuery<By<Vec<Task>, task::Search>>;

//! [`Task`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tracked task.
///
/// Not owned by any particular [`User`]: every authenticated [`User`] may
/// read and modify any [`Task`].
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// ID of this [`Task`].
    pub id: Id,

    /// Content of this [`Task`].
    #[serde(default)]
    pub content: String,

    /// Status of this [`Task`].
    #[serde(default)]
    pub status: String,

    /// Date of this [`Task`], as provided by the client.
    #[serde(default)]
    pub date: String,

    /// Name of the file attached to this [`Task`].
    ///
    /// Immutable after creation.
    #[serde(default)]
    pub file_name: String,

    /// Content of the file attached to this [`Task`].
    ///
    /// Immutable after creation.
    #[serde(default)]
    pub file_content: String,
}

/// ID of a [`Task`].
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Generates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

/// Substring to search [`Task`]s by their [`Task::content`].
///
/// Empty [`Search`] matches every [`Task`].
#[derive(AsRef, Clone, Debug, Default, Display, From)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Search(String);

impl Search {
    /// Indicates whether the provided [`Task`] matches this [`Search`].
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.content.contains(self.0.as_str())
    }
}

//! [`Database`]-related implementations.

#[cfg(feature = "fs")]
pub mod fs;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "fs")]
pub use self::fs::Fs;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "fs")]
    /// [`Fs`] error.
    Fs(fs::Error),
}

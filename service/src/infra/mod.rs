//! Infrastructure layer.

pub mod database;

pub use self::database::Database;
#[cfg(feature = "fs")]
pub use self::database::{fs, Fs};

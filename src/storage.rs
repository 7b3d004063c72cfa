//! JSON file storage for application state.
//!
//! Each store keeps its whole collection under a single key file, e.g.
//! `finance-transactions.json`, and rewrites the file wholesale after every
//! change. Malformed or unreadable files are logged and replaced with the
//! default value rather than surfaced to the user.

use std::{fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// The file name under which the transaction collection is stored.
pub const TRANSACTIONS_FILE: &str = "finance-transactions.json";

/// The file name under which the user's preferences are stored.
pub const SETTINGS_FILE: &str = "settings.json";

/// Load a value from the JSON file at `path`.
///
/// A missing file is treated as a fresh install and yields the default value.
/// A file that cannot be read or parsed also yields the default value, with a
/// warning in the logs, so that a corrupt file never locks the user out.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(error) => {
            tracing::warn!(
                "could not read data file {}: {error}, starting from the default state",
                path.display()
            );
            return T::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                "could not parse data file {}: {error}, starting from the default state",
                path.display()
            );
            T::default()
        }
    }
}

/// Serialize `value` as JSON and overwrite the file at `path` with it.
///
/// The write replaces the whole file in one go, there is no partial update or
/// retry. Callers persist after every mutation so the file always mirrors the
/// in-memory state.
pub fn persist<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    let contents = serde_json::to_string_pretty(value)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    fs::write(path, contents).map_err(|error| {
        tracing::error!("could not write data file {}: {error}", path.display());
        Error::StorageError(error.to_string())
    })
}

//! The store that owns the preferences record and its JSON file.

use std::path::PathBuf;

use crate::{
    Error,
    preferences::core::Preferences,
    storage::{load_or_default, persist},
};

/// Owns the preferences record and keeps it in sync with its JSON file.
#[derive(Debug)]
pub struct PreferenceStore {
    preferences: Preferences,
    backing_path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Open the store backed by the JSON file at `path`.
    ///
    /// A missing, unreadable, or malformed file yields the default preferences.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let preferences = load_or_default(&path);

        Self {
            preferences,
            backing_path: Some(path),
        }
    }

    /// Create a store that only lives in memory. Used in tests.
    pub fn in_memory() -> Self {
        Self {
            preferences: Preferences::default(),
            backing_path: None,
        }
    }

    /// The current preferences.
    pub fn get(&self) -> &Preferences {
        &self.preferences
    }

    /// Replace the stored preferences wholesale.
    ///
    /// # Errors
    /// Returns [Error::PreferencesSaveError] if the record cannot be written to
    /// disk. The in-memory record is left unchanged in that case.
    pub fn set(&mut self, preferences: Preferences) -> Result<(), Error> {
        if let Some(path) = &self.backing_path {
            persist(path, &preferences).map_err(|error| {
                tracing::error!("could not save preferences: {error}");
                Error::PreferencesSaveError
            })?;
        }

        self.preferences = preferences;

        Ok(())
    }
}

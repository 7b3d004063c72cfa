//! Implements a struct that holds the state of the server.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    preferences::store::PreferenceStore,
    storage::{SETTINGS_FILE, TRANSACTIONS_FILE},
    transaction::store::TransactionStore,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The store holding the transaction collection.
    pub transaction_store: Arc<Mutex<TransactionStore>>,

    /// The store holding the user preferences.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl AppState {
    /// Create a new [AppState] backed by JSON files in `data_directory`.
    ///
    /// Missing or malformed files yield empty data, the files are created on
    /// the first write. `local_timezone` should be a valid, canonical timezone
    /// name, e.g. "Pacific/Auckland".
    pub fn new(data_directory: &Path, local_timezone: &str) -> Self {
        let transaction_store = TransactionStore::open(data_directory.join(TRANSACTIONS_FILE));
        let preference_store = PreferenceStore::open(data_directory.join(SETTINGS_FILE));

        Self {
            local_timezone: local_timezone.to_owned(),
            transaction_store: Arc::new(Mutex::new(transaction_store)),
            preference_store: Arc::new(Mutex::new(preference_store)),
        }
    }

    /// Create an [AppState] that does not touch the file system. Used in tests.
    pub fn new_in_memory() -> Self {
        Self {
            local_timezone: "Etc/UTC".to_owned(),
            transaction_store: Arc::new(Mutex::new(TransactionStore::in_memory())),
            preference_store: Arc::new(Mutex::new(PreferenceStore::in_memory())),
        }
    }
}

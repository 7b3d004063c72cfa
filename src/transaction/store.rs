//! The store that owns the transaction collection and its JSON file.

use std::path::PathBuf;

use crate::{
    Error,
    storage::{load_or_default, persist},
    transaction::core::{Transaction, TransactionDraft, TransactionId, TransactionPatch},
};

/// Owns the in-memory transaction collection and keeps it in sync with its
/// JSON file.
///
/// Records are kept newest first: [TransactionStore::add] prepends. The store
/// performs no validation, that is the job of the form endpoints, and every
/// successful mutation rewrites the whole collection to disk.
#[derive(Debug)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    backing_path: Option<PathBuf>,
}

impl TransactionStore {
    /// Open the store backed by the JSON file at `path`.
    ///
    /// A missing, unreadable, or malformed file yields an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let transactions = load_or_default(&path);

        Self {
            transactions,
            backing_path: Some(path),
        }
    }

    /// Create a store that only lives in memory. Used in tests.
    pub fn in_memory() -> Self {
        Self {
            transactions: Vec::new(),
            backing_path: None,
        }
    }

    /// All transactions, newest first.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get a transaction by its ID.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// Store `draft` as a new transaction and return the stored record.
    ///
    /// The new record is given the next free ID and placed at the front of the
    /// collection.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be written to disk.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        let id = self.next_id();
        let transaction = Transaction {
            id,
            title: draft.title,
            amount: draft.amount,
            transaction_type: draft.transaction_type,
            category: draft.category,
            date: draft.date,
            notes: draft.notes,
        };

        self.transactions.insert(0, transaction.clone());
        self.persist()?;

        Ok(transaction)
    }

    /// Merge the set fields of `patch` into the transaction with the given `id`.
    ///
    /// Returns `Ok(false)` without touching the collection when no transaction
    /// has that ID.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be written to disk.
    pub fn update(&mut self, id: TransactionId, patch: TransactionPatch) -> Result<bool, Error> {
        let Some(transaction) = self
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
        else {
            return Ok(false);
        };

        if let Some(title) = patch.title {
            transaction.title = title;
        }
        if let Some(amount) = patch.amount {
            transaction.amount = amount;
        }
        if let Some(transaction_type) = patch.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(category) = patch.category {
            transaction.category = category;
        }
        if let Some(date) = patch.date {
            transaction.date = date;
        }
        if let Some(notes) = patch.notes {
            transaction.notes = notes;
        }

        self.persist()?;

        Ok(true)
    }

    /// Remove the transaction with the given `id`.
    ///
    /// Returns `Ok(false)` without touching the collection when no transaction
    /// has that ID.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be written to disk.
    pub fn delete(&mut self, id: TransactionId) -> Result<bool, Error> {
        let count_before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.id != id);

        if self.transactions.len() == count_before {
            return Ok(false);
        }

        self.persist()?;

        Ok(true)
    }

    fn next_id(&self) -> TransactionId {
        self.transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn persist(&self) -> Result<(), Error> {
        match &self.backing_path {
            Some(path) => persist(path, &self.transactions),
            None => Ok(()),
        }
    }
}

//! The transaction records: the data model, its store, and the pages and
//! endpoints for managing them.

pub mod core;
pub mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
pub mod store;
mod transactions_page;

pub use core::{
    EXPENSE_CATEGORIES, INCOME_CATEGORIES, Transaction, TransactionDraft, TransactionId,
    TransactionPatch, TransactionType,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use store::TransactionStore;
pub use transactions_page::{FilterQuery, get_transactions_page};

//! The user preferences: the data model, its store, and the settings page.

mod core;
mod settings_page;
pub mod store;
mod update_endpoint;

pub use core::{CURRENCIES, Currency, Preferences};
pub use settings_page::get_settings_page;
pub use update_endpoint::update_preferences_endpoint;

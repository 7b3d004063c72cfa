//! The dashboard page: summary cards and recent activity.

mod cards;
mod page;

pub use page::get_dashboard_page;

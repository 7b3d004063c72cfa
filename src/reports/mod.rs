//! The reports page: summary statistics and charts.

mod charts;
mod page;

pub use page::get_reports_page;

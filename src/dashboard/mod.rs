//! Dashboard module
//!
//! Provides the signed-in user's overview page: summary cards, charts of
//! their spending and a filterable table of their transactions.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;

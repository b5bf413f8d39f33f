//! Transaction management for FinanceFlow.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for recording transactions
//! - Categories and the suggestions shown while typing one
//! - Database functions for storing, listing, and deleting transactions
//! - Filtering and paging for the transactions table
//! - The add transaction dialog and the endpoints behind it

mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod table;

pub use category::{Category, category_suggestions, get_category_suggestions, list_categories};
pub use core::{
    Transaction, TransactionBuilder, TransactionId, TransactionKind, YearMonth,
    create_transaction, create_transaction_table, delete_transaction, list_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub(crate) use form::{add_transaction_button, add_transaction_dialog};
pub use table::{
    TableFilter, TableQuery, clamp_page, filter_transactions, month_options, page_count,
    paginate, range_text, table_url,
};

#[cfg(test)]
pub use core::count_transactions;

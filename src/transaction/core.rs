//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::{Error, auth::UserID, transaction::Category};

/// The ID the database assigns to a transaction.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. a salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The lower case name used in forms, query strings and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(()),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// A calendar month of a particular year, e.g. October 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Create a year-month from `year` and `month`.
    pub fn new(year: i32, month: Month) -> Self {
        Self {
            year,
            month: month.into(),
        }
    }

    /// The year-month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        // `month` is only ever set from a valid `Month`.
        Month::try_from(self.month).unwrap_or(Month::January)
    }

    /// The three letter English abbreviation of the month, e.g. "Oct".
    pub fn abbreviation(&self) -> &'static str {
        match self.month() {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        }
    }

    /// A label such as "Oct 2025".
    pub fn label(&self) -> String {
        format!("{} {}", self.abbreviation(), self.year)
    }
}

/// Formats as `YYYY-MM`, the format used in query strings.
impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or(())?;

        if year.len() != 4 || month.len() != 2 {
            return Err(());
        }

        let year: i32 = year.parse().map_err(|_| ())?;
        let month: u8 = month.parse().map_err(|_| ())?;
        let month = Month::try_from(month).map_err(|_| ())?;

        Ok(Self::new(year, month))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that recorded the transaction.
    pub owner_id: UserID,
    /// The amount of money spent or earned. Always greater than zero.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,
    /// What the money was earned or spent on, e.g. "Food".
    pub category: Category,
    /// An optional note about the transaction.
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        owner_id: UserID,
        kind: TransactionKind,
        amount: f64,
        category: Category,
        date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            owner_id,
            kind,
            amount,
            category,
            date,
            description: None,
        }
    }

    /// The amount with the sign of its kind: positive for income, negative
    /// for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// let builder = Transaction::build(
///         user_id,
///         TransactionKind::Expense,
///         45.99,
///         Category::new("Food")?,
///         date!(2025-01-15),
///     )
///     .description(Some("Groceries"));
/// let transaction = create_transaction(builder, &connection)?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The user the transaction belongs to.
    pub owner_id: UserID,
    /// Whether the money was earned or spent.
    pub kind: TransactionKind,
    /// The amount of money, must be greater than zero.
    pub amount: f64,
    /// What the money was earned or spent on.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
    /// An optional note. Blank descriptions are stored as `None`.
    pub description: Option<String>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    ///
    /// The description is trimmed and an empty description is treated as no
    /// description.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_owned);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is not greater than zero,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !(builder.amount.is_finite() && builder.amount > 0.0) {
        return Err(Error::NonPositiveAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (owner_id, amount, kind, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, owner_id, amount, kind, category, description, date, created_at",
        )?
        .query_row(
            (
                builder.owner_id.as_i64(),
                builder.amount,
                builder.kind,
                builder.category.as_str(),
                builder.description,
                builder.date,
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get all of the transactions recorded by `owner_id`, most recent first.
///
/// Transactions on the same date are ordered by when they were recorded,
/// newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn list_transactions(
    owner_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, owner_id, amount, kind, category, description, date, created_at
             FROM \"transaction\"
             WHERE owner_id = :owner_id
             ORDER BY date DESC, created_at DESC, id DESC",
        )?
        .query_map(&[(":owner_id", &owner_id.as_i64())], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

/// Delete the transaction with `id` if it belongs to `owner_id`.
///
/// Returns the number of deleted rows, zero if no such transaction exists for
/// the user.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transaction(
    id: TransactionId,
    owner_id: UserID,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND owner_id = ?2",
            (id, owner_id.as_i64()),
        )
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// Transactions are deleted along with the user that owns them.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
                category TEXT NOT NULL CHECK (length(trim(category)) > 0),
                description TEXT,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY(owner_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    // Used by the dashboard and category queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_owner_date ON \"transaction\"(owner_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let owner_id = row.get(1).map(UserID::new)?;
    let amount = row.get(2)?;
    let kind = row.get(3)?;
    let raw_category: String = row.get(4)?;
    let description = row.get(5)?;
    let date = row.get(6)?;
    let created_at = row.get(7)?;

    Ok(Transaction {
        id,
        owner_id,
        amount,
        kind,
        category: Category::new_unchecked(&raw_category),
        description,
        date,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================

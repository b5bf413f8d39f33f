//! Transaction categories and the suggestions offered while typing one.

use std::{
    collections::BTreeSet,
    fmt::Display,
    sync::{Arc, Mutex},
};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, auth::UserID};

/// The categories suggested to every user, whether or not they have used them.
pub const DEFAULT_CATEGORIES: [&str; 11] = [
    "Food",
    "Transport",
    "Housing",
    "Health",
    "Education",
    "Leisure",
    "Shopping",
    "Investments",
    "Salary",
    "Freelance",
    "Other",
];

/// The `id` of the datalist holding category suggestions.
pub(crate) const CATEGORY_DATALIST_ID: &str = "category-suggestions";

/// A free-form, non-empty label describing what a transaction was for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category(String);

impl Category {
    /// Create a category from `name`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyCategory] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategory)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category without validation.
    ///
    /// Only use this for names that were validated before, e.g. when reading
    /// from the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// The category name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Get the distinct categories used by `owner_id`'s transactions, sorted by name.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn list_categories(owner_id: UserID, connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT DISTINCT category FROM \"transaction\"
             WHERE owner_id = :owner_id
             ORDER BY category ASC",
        )?
        .query_map(&[(":owner_id", &owner_id.as_i64())], |row| {
            row.get::<_, String>(0)
                .map(|name| Category::new_unchecked(&name))
        })?
        .map(|category_result| category_result.map_err(Error::from))
        .collect()
}

/// Merge the default categories with `existing`, sorted and without duplicates.
///
/// Names that differ only by case are treated as the same category and the
/// first spelling seen wins, defaults first.
pub fn category_suggestions(existing: &[Category]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut suggestions: Vec<String> = DEFAULT_CATEGORIES
        .iter()
        .copied()
        .chain(existing.iter().map(Category::as_str))
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(str::to_owned)
        .collect();

    suggestions.sort_by_key(|name| name.to_lowercase());
    suggestions
}

/// Keep the suggestions that contain `search`, ignoring case.
///
/// A blank search keeps everything.
pub fn filter_suggestions<'a>(suggestions: &'a [String], search: &str) -> Vec<&'a str> {
    let search = search.trim().to_lowercase();

    suggestions
        .iter()
        .filter(|suggestion| suggestion.to_lowercase().contains(&search))
        .map(String::as_str)
        .collect()
}

/// The `<option>` elements for the category datalist.
pub(crate) fn category_options(suggestions: &[&str]) -> Markup {
    html! {
        @for suggestion in suggestions {
            option value=(suggestion) {}
        }
    }
}

/// The category datalist, filled with `suggestions`.
pub(crate) fn category_datalist(suggestions: &[&str]) -> Markup {
    html! {
        datalist id=(CATEGORY_DATALIST_ID) { (category_options(suggestions)) }
    }
}

/// The state needed to suggest categories.
#[derive(Debug, Clone)]
pub struct CategoriesState {
    /// The database connection for reading categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string for [get_category_suggestions].
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    /// The text typed into the category input so far.
    ///
    /// The category input sends its value under its own name, `category`.
    #[serde(default, alias = "category")]
    pub search: String,
}

/// A route handler that returns the category suggestions matching the
/// `search` query parameter as a list of `<option>` elements.
pub async fn get_category_suggestions(
    State(state): State<CategoriesState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<CategoryQuery>,
) -> Response {
    let existing = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_alert_response();
            }
        };

        match list_categories(user_id, &connection) {
            Ok(categories) => categories,
            Err(error) => {
                tracing::error!("could not list categories for user {user_id}: {error}");
                return error.into_alert_response();
            }
        }
    };

    let suggestions = category_suggestions(&existing);
    let matches = filter_suggestions(&suggestions, &query.search);

    category_options(&matches).into_response()
}


#[cfg(test)]
mod list_categories_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        auth::{Email, PasswordHash, UserID, create_user},
        db::initialize,
        transaction::{
            Category, Transaction, TransactionKind, create_transaction, delete_transaction,
        },
    };

    use super::list_categories;

    fn get_test_connection() -> (Connection, UserID) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user(
            Email::new("test@example.com").unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &conn,
        )
        .unwrap();

        (conn, user.id)
    }

    #[test]
    fn lists_distinct_sorted_categories() {
        let (conn, user_id) = get_test_connection();
        for name in ["Transport", "Food", "Food"] {
            create_transaction(
                Transaction::build(
                    user_id,
                    TransactionKind::Expense,
                    1.0,
                    Category::new(name).unwrap(),
                    date!(2025 - 10 - 05),
                ),
                &conn,
            )
            .unwrap();
        }

        let categories = list_categories(user_id, &conn).unwrap();

        assert_eq!(
            categories,
            vec![
                Category::new_unchecked("Food"),
                Category::new_unchecked("Transport")
            ]
        );
    }

    #[test]
    fn deleting_only_transaction_removes_category() {
        let (conn, user_id) = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(
                user_id,
                TransactionKind::Expense,
                1.0,
                Category::new("Pets").unwrap(),
                date!(2025 - 10 - 05),
            ),
            &conn,
        )
        .unwrap();
        assert_eq!(list_categories(user_id, &conn).unwrap().len(), 1);

        delete_transaction(transaction.id, user_id, &conn).unwrap();

        assert!(list_categories(user_id, &conn).unwrap().is_empty());
    }
}

#[cfg(test)]
mod endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{auth::UserID, db::initialize, test_utils::parse_html_fragment};

    use super::{CategoriesState, CategoryQuery, get_category_suggestions};

    #[tokio::test]
    async fn returns_matching_options() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let state = CategoriesState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_category_suggestions(
            State(state),
            Extension(UserID::new(1)),
            Query(CategoryQuery {
                search: "sal".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let values: Vec<_> = html
            .select(&Selector::parse("option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(values, vec!["Salary"]);
    }
}

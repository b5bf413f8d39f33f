//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - The HTML view function that puts the cards, charts and table together
//! - The state type used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    auth::{Email, UserID},
    dashboard::{
        aggregation::{CategoryTotal, category_breakdown, monthly_series, summarize},
        cards::{category_breakdown_view, summary_cards_view},
        charts::{
            DashboardChart, category_breakdown_chart, charts_script, charts_view,
            monthly_overview_chart,
        },
        tables::transactions_table_view,
    },
    endpoints,
    html::{HeadElement, base, dollar_input_styles},
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{
        TableFilter, TableQuery, Transaction, add_transaction_button,
        add_transaction_dialog, category_suggestions, list_categories, list_transactions,
    },
};

/// The state needed for displaying the dashboard page.
///
/// Contains the database connection and timezone information required
/// by dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Everything read from the database to render the dashboard.
struct DashboardData {
    transactions: Vec<Transaction>,
    category_suggestions: Vec<String>,
}

/// Display the signed-in user's summary cards, charts and transactions table.
///
/// The `month`, `kind` and `page` query parameters control the table, values
/// that cannot be parsed are ignored. The user's ID and email are attached to
/// the request by the auth guard.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
    Extension(email): Extension<Email>,
    Query(query): Query<TableQuery>,
) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;
    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let data = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_dashboard_data(user_id, &connection)?
    };

    Ok(dashboard_view(&email, &data, &query.filter(), query.page(), today).into_response())
}

fn get_dashboard_data(user_id: UserID, connection: &Connection) -> Result<DashboardData, Error> {
    let transactions = list_transactions(user_id, connection).inspect_err(|error| {
        tracing::error!("could not get transactions for user {user_id}: {error}")
    })?;
    let categories = list_categories(user_id, connection).inspect_err(|error| {
        tracing::error!("could not get categories for user {user_id}: {error}")
    })?;

    Ok(DashboardData {
        transactions,
        category_suggestions: category_suggestions(&categories),
    })
}

/// Creates the dashboard charts from the user's transactions.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_dashboard_charts(
    breakdown: &[CategoryTotal],
    transactions: &[Transaction],
) -> [DashboardChart; 2] {
    let series = monthly_series(transactions);

    [
        DashboardChart {
            id: "category-chart",
            title: "Expenses by category",
            options: category_breakdown_chart(breakdown).map(|chart| chart.to_string()),
            empty_message: "Add an expense to see where your money goes.",
        },
        DashboardChart {
            id: "monthly-chart",
            title: "Monthly overview",
            options: monthly_overview_chart(&series).map(|chart| chart.to_string()),
            empty_message: "Add a transaction to see your monthly totals.",
        },
    ]
}

fn dashboard_view(
    email: &Email,
    data: &DashboardData,
    filter: &TableFilter,
    page: usize,
    today: Date,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW, email).into_html();
    let summary = summarize(&data.transactions);
    let breakdown = category_breakdown(&data.transactions);
    let charts = build_dashboard_charts(&breakdown, &data.transactions);
    let suggestions: Vec<&str> = data
        .category_suggestions
        .iter()
        .map(String::as_str)
        .collect();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center gap-4 px-2 py-4 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="flex w-full items-center justify-between"
            {
                h2 class="text-2xl font-bold" { "Dashboard" }

                (add_transaction_button())
            }

            (summary_cards_view(&summary))

            (charts_view(&charts))

            (category_breakdown_view(&breakdown))

            (transactions_table_view(&data.transactions, filter, page))
        }

        (add_transaction_dialog(today, &suggestions))
    );

    let head_elements = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
        dollar_input_styles(),
    ];

    base("Dashboard", &head_elements, &content)
}

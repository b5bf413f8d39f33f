//! Transaction data aggregation for the summary cards and charts.
//!
//! Every function works on the full, in-memory list of a user's
//! transactions and is recomputed on each page load.

use std::collections::{BTreeMap, HashMap};

use crate::transaction::{Category, Transaction, TransactionKind, YearMonth};

/// The maximum number of categories shown in the expense breakdown.
pub(super) const MAX_BREAKDOWN_CATEGORIES: usize = 8;
/// The maximum number of months shown in the monthly chart.
pub(super) const MAX_SERIES_MONTHS: usize = 6;

/// Total income, total expenses and their difference.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(super) struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Sums income and expenses separately.
///
/// `balance` is `income - expense`. An empty list gives all zeros.
pub(super) fn summarize(transactions: &[Transaction]) -> Summary {
    let (income, expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), transaction| {
                match transaction.kind {
                    TransactionKind::Income => (income + transaction.amount, expense),
                    TransactionKind::Expense => (income, expense + transaction.amount),
                }
            });

    Summary {
        income,
        expense,
        balance: income - expense,
    }
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Sums expenses per category and keeps the [MAX_BREAKDOWN_CATEGORIES]
/// largest, largest first.
///
/// Categories with equal totals keep the order in which they first appear in
/// `transactions`.
pub(super) fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_category: HashMap<&Category, usize> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        match index_by_category.get(&transaction.category) {
            Some(&index) => totals[index].total += transaction.amount,
            None => {
                index_by_category.insert(&transaction.category, totals.len());
                totals.push(CategoryTotal {
                    category: transaction.category.clone(),
                    total: transaction.amount,
                });
            }
        }
    }

    // `sort_by` is stable, so ties keep first-seen order.
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals.truncate(MAX_BREAKDOWN_CATEGORIES);
    totals
}

/// The share of `grand_total` that `total` makes up, rounded to a whole percent.
///
/// Returns zero when `grand_total` is zero.
pub(super) fn percentage_of(total: f64, grand_total: f64) -> u32 {
    if grand_total <= 0.0 {
        return 0;
    }

    (total / grand_total * 100.0).round() as u32
}

/// Income and expense totals for one month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthlyTotals {
    pub month: YearMonth,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyTotals {
    /// The three letter month name for the chart axis, e.g. "Jan".
    pub fn label(&self) -> &'static str {
        self.month.abbreviation()
    }
}

/// Sums income and expenses per calendar month and keeps the latest
/// [MAX_SERIES_MONTHS] months, oldest first.
pub(super) fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut totals_by_month: BTreeMap<YearMonth, (f64, f64)> = BTreeMap::new();

    for transaction in transactions {
        let (income, expense) = totals_by_month
            .entry(YearMonth::from_date(transaction.date))
            .or_insert((0.0, 0.0));

        match transaction.kind {
            TransactionKind::Income => *income += transaction.amount,
            TransactionKind::Expense => *expense += transaction.amount,
        }
    }

    let skip = totals_by_month.len().saturating_sub(MAX_SERIES_MONTHS);

    totals_by_month
        .into_iter()
        .skip(skip)
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
        })
        .collect()
}

//! Filtering and paging for the transactions table.

use serde::Deserialize;

use crate::transaction::{Transaction, TransactionKind, YearMonth};

/// The number of transactions shown per page.
pub const PAGE_SIZE: usize = 10;

/// Restricts the table to one month and/or one kind of transaction.
///
/// `None` means no filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableFilter {
    pub month: Option<YearMonth>,
    pub kind: Option<TransactionKind>,
}

impl TableFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        self.month
            .is_none_or(|month| YearMonth::from_date(transaction.date) == month)
            && self.kind.is_none_or(|kind| transaction.kind == kind)
    }
}

/// Keep the transactions that match `filter`, most recent date first.
///
/// Transactions on the same date keep their order in `transactions`.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TableFilter,
) -> Vec<&'a Transaction> {
    let mut filtered: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .collect();

    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// The number of pages needed to show `item_count` items.
pub fn page_count(item_count: usize) -> usize {
    item_count.div_ceil(PAGE_SIZE)
}

/// Clamp `page` into `1..=page_count(item_count)`, or 1 if there are no items.
pub fn clamp_page(page: usize, item_count: usize) -> usize {
    page.clamp(1, page_count(item_count).max(1))
}

/// The items on `page`, counting pages from one.
///
/// Pages outside the valid range are clamped, see [clamp_page].
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let page = clamp_page(page, items.len());
    let start = (page - 1) * PAGE_SIZE;
    let end = (page * PAGE_SIZE).min(items.len());

    &items[start.min(end)..end]
}

/// The text describing which items are on `page`, e.g. "Showing 11 to 20 of 35".
pub fn range_text(page: usize, item_count: usize) -> String {
    if item_count == 0 {
        return "Showing 0 of 0".to_owned();
    }

    let page = clamp_page(page, item_count);
    let start = (page - 1) * PAGE_SIZE + 1;
    let end = (page * PAGE_SIZE).min(item_count);

    format!("Showing {start} to {end} of {item_count}")
}

/// The distinct months in `transactions`, most recent first.
pub fn month_options(transactions: &[Transaction]) -> Vec<YearMonth> {
    let mut months: Vec<YearMonth> = transactions
        .iter()
        .map(|transaction| YearMonth::from_date(transaction.date))
        .collect();

    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();
    months
}

/// The query string for the transactions table.
///
/// Values are kept as raw strings so that a malformed value falls back to
/// no filter instead of rejecting the whole request.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TableQuery {
    /// `YYYY-MM` or "all".
    pub month: Option<String>,
    /// "income", "expense" or "all".
    pub kind: Option<String>,
    /// The page number, starting from one.
    pub page: Option<String>,
}

impl TableQuery {
    /// The filter described by the query, ignoring values that cannot be parsed.
    pub fn filter(&self) -> TableFilter {
        TableFilter {
            month: self.month.as_deref().and_then(|month| month.parse().ok()),
            kind: self.kind.as_deref().and_then(|kind| kind.parse().ok()),
        }
    }

    /// The requested page, or 1 if it is missing or invalid.
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.parse::<usize>().ok())
            .filter(|&page| page > 0)
            .unwrap_or(1)
    }
}

/// Build the URL for `page` of the table at `route` with `filter` applied.
pub fn table_url(route: &str, filter: &TableFilter, page: usize) -> String {
    let month = filter
        .month
        .map(|month| month.to_string())
        .unwrap_or_else(|| "all".to_owned());
    let kind = filter.kind.map(|kind| kind.as_str()).unwrap_or("all");

    format!("{route}?month={month}&kind={kind}&page={page}")
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, OffsetDateTime, macros::date};

    use crate::{
        auth::UserID,
        transaction::{Category, Transaction, TransactionKind, YearMonth},
    };

    use super::{
        PAGE_SIZE, TableFilter, TableQuery, clamp_page, filter_transactions, month_options,
        page_count, paginate, range_text, table_url,
    };

    fn transaction(id: i64, kind: TransactionKind, date: Date) -> Transaction {
        Transaction {
            id,
            owner_id: UserID::new(1),
            amount: 1.0,
            kind,
            category: Category::new_unchecked("Food"),
            description: None,
            date,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn ids(transactions: &[&Transaction]) -> Vec<i64> {
        transactions.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn no_filter_sorts_by_date_descending() {
        let transactions = [
            transaction(1, TransactionKind::Expense, date!(2025 - 01 - 01)),
            transaction(2, TransactionKind::Income, date!(2025 - 03 - 01)),
            transaction(3, TransactionKind::Expense, date!(2025 - 02 - 01)),
        ];

        let filtered = filter_transactions(&transactions, &TableFilter::default());

        assert_eq!(ids(&filtered), vec![2, 3, 1]);
    }

    #[test]
    fn same_date_keeps_list_order() {
        let transactions = [
            transaction(5, TransactionKind::Expense, date!(2025 - 01 - 01)),
            transaction(4, TransactionKind::Expense, date!(2025 - 01 - 01)),
            transaction(6, TransactionKind::Expense, date!(2025 - 01 - 01)),
        ];

        let filtered = filter_transactions(&transactions, &TableFilter::default());

        assert_eq!(ids(&filtered), vec![5, 4, 6]);
    }

    #[test]
    fn filters_by_month_and_kind() {
        let transactions = [
            transaction(1, TransactionKind::Expense, date!(2025 - 01 - 31)),
            transaction(2, TransactionKind::Income, date!(2025 - 01 - 15)),
            transaction(3, TransactionKind::Expense, date!(2025 - 02 - 01)),
        ];
        let january = YearMonth::new(2025, Month::January);

        let by_month = filter_transactions(
            &transactions,
            &TableFilter {
                month: Some(january),
                kind: None,
            },
        );
        let by_both = filter_transactions(
            &transactions,
            &TableFilter {
                month: Some(january),
                kind: Some(TransactionKind::Expense),
            },
        );

        assert_eq!(ids(&by_month), vec![1, 2]);
        assert_eq!(ids(&by_both), vec![1]);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(PAGE_SIZE), 1);
        assert_eq!(page_count(PAGE_SIZE + 1), 2);
        assert_eq!(page_count(35), 4);
    }

    #[test]
    fn paginate_returns_page_slice() {
        let items: Vec<usize> = (0..35).collect();

        assert_eq!(paginate(&items, 1), &items[0..10]);
        assert_eq!(paginate(&items, 2), &items[10..20]);
        assert_eq!(paginate(&items, 4), &items[30..35]);
    }

    #[test]
    fn paginate_clamps_out_of_range_pages() {
        let items: Vec<usize> = (0..35).collect();
        let empty: Vec<usize> = vec![];

        assert_eq!(paginate(&items, 0), &items[0..10]);
        assert_eq!(paginate(&items, 99), &items[30..35]);
        assert!(paginate(&empty, 3).is_empty());
        assert_eq!(clamp_page(3, 0), 1);
    }

    #[test]
    fn range_text_describes_page() {
        assert_eq!(range_text(1, 35), "Showing 1 to 10 of 35");
        assert_eq!(range_text(4, 35), "Showing 31 to 35 of 35");
        assert_eq!(range_text(9, 35), "Showing 31 to 35 of 35");
        assert_eq!(range_text(1, 0), "Showing 0 of 0");
    }

    #[test]
    fn month_options_are_distinct_and_most_recent_first() {
        let transactions = [
            transaction(1, TransactionKind::Expense, date!(2024 - 12 - 01)),
            transaction(2, TransactionKind::Expense, date!(2025 - 02 - 10)),
            transaction(3, TransactionKind::Income, date!(2025 - 02 - 01)),
        ];

        assert_eq!(
            month_options(&transactions),
            vec![
                YearMonth::new(2025, Month::February),
                YearMonth::new(2024, Month::December)
            ]
        );
    }

    #[test]
    fn invalid_query_values_fall_back_to_defaults() {
        let query = TableQuery {
            month: Some("October".to_owned()),
            kind: Some("refund".to_owned()),
            page: Some("0".to_owned()),
        };

        assert_eq!(query.filter(), TableFilter::default());
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn valid_query_values_are_parsed() {
        let query: TableQuery =
            serde_html_form::from_str("month=2025-10&kind=income&page=3").unwrap();

        assert_eq!(
            query.filter(),
            TableFilter {
                month: Some(YearMonth::new(2025, Month::October)),
                kind: Some(TransactionKind::Income),
            }
        );
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn table_url_round_trips_filter() {
        let filter = TableFilter {
            month: Some(YearMonth::new(2025, Month::October)),
            kind: None,
        };

        let url = table_url("/dashboard", &filter, 2);

        assert_eq!(url, "/dashboard?month=2025-10&kind=all&page=2");
    }
}

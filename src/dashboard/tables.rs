//! The filterable, paginated table of the user's transactions.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    pagination::{MAX_PAGE_LINKS, create_pagination_indicators, pagination_view},
    transaction::{
        TableFilter, Transaction, TransactionKind, clamp_page, filter_transactions,
        month_options, page_count, paginate, range_text, table_url,
    },
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Renders the transactions table for `page` of the transactions matching `filter`.
///
/// The month options are taken from all of `transactions` so that the user
/// can switch between months without clearing the filter first.
pub(super) fn transactions_table_view(
    transactions: &[Transaction],
    filter: &TableFilter,
    page: usize,
) -> Markup {
    let filtered = filter_transactions(transactions, filter);
    let page = clamp_page(page, filtered.len());
    let rows = paginate(&filtered, page);
    let indicators =
        create_pagination_indicators(page as u64, page_count(filtered.len()) as u64, MAX_PAGE_LINKS);
    let empty_message = if transactions.is_empty() {
        "No transactions yet. Add one to get started."
    } else {
        "No transactions match the selected filters."
    };

    html! {
        section id="transactions" class={ "w-full " (CARD_STYLE) }
        {
            div class="flex flex-col lg:flex-row lg:items-end lg:justify-between gap-4 mb-4"
            {
                h3 class="text-xl font-semibold" { "Transactions" }

                (filter_form(transactions, filter))
            }

            div class="overflow-x-auto"
            {
                table class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class="px-6 py-3 text-right" { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for transaction in rows {
                            (transaction_row_view(transaction))
                        }

                        @if rows.is_empty() {
                            tr
                            {
                                td
                                    colspan="5"
                                    data-empty-state="true"
                                    class="px-6 py-4 text-center"
                                {
                                    (empty_message)
                                }
                            }
                        }
                    }
                }
            }

            div class="flex flex-col sm:flex-row items-center justify-between gap-2 mt-2"
            {
                p class="text-sm text-gray-600 dark:text-gray-400" data-range-text
                {
                    (range_text(page, filtered.len()))
                }

                (pagination_view(&indicators, |page| {
                    table_url(endpoints::DASHBOARD_VIEW, filter, page as usize)
                }))
            }
        }
    }
}

fn filter_form(transactions: &[Transaction], filter: &TableFilter) -> Markup {
    let months = month_options(transactions);
    let kinds = [TransactionKind::Income, TransactionKind::Expense];

    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex flex-wrap items-end gap-4"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select
                    id="month"
                    name="month"
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="all" selected[filter.month.is_none()] { "All months" }

                    @for month in months {
                        option
                            value=(month.to_string())
                            selected[filter.month == Some(month)]
                        {
                            (month.label())
                        }
                    }
                }
            }

            div
            {
                label for="kind" class=(FORM_LABEL_STYLE) { "Type" }

                select
                    id="kind"
                    name="kind"
                    onchange="this.form.submit()"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="all" selected[filter.kind.is_none()] { "All types" }

                    @for kind in kinds {
                        option value=(kind.as_str()) selected[filter.kind == Some(kind)]
                        {
                            (kind.label())
                        }
                    }
                }
            }

            button
                type="submit"
                class="px-4 py-2.5 rounded text-sm bg-gray-200 dark:bg-gray-700 hover:bg-gray-300"
            {
                "Apply"
            }
        }
    }
}

fn amount_text(transaction: &Transaction) -> (String, &'static str) {
    match transaction.kind {
        TransactionKind::Income => (
            format!("+{}", format_currency(transaction.amount)),
            "text-green-700 dark:text-green-300",
        ),
        TransactionKind::Expense => (
            format_currency(transaction.signed_amount()),
            "text-red-700 dark:text-red-300",
        ),
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (amount, amount_class) = amount_text(transaction);
    let (description, tooltip) = transaction
        .description
        .as_deref()
        .map(format_description)
        .unwrap_or_else(|| ("-".to_owned(), None));
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let confirm_message = format!(
        "Are you sure you want to delete this {} of {}? This cannot be undone.",
        transaction.kind.as_str(),
        format_currency(transaction.amount)
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row=(transaction.id)
        {
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class={ "px-6 py-4 text-right whitespace-nowrap " (amount_class) } { (amount) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}

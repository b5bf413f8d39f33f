//! Summary cards for the total balance, income and expenses.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{CategoryTotal, Summary, percentage_of},
    html::{CARD_STYLE, CATEGORY_BADGE_STYLE, format_currency},
};

/// Renders the three summary cards.
///
/// The balance card turns red when the user has spent more than they earned.
pub(super) fn summary_cards_view(summary: &Summary) -> Markup {
    let balance_style = if summary.balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-gray-900 dark:text-white"
    };

    html! {
        section class="grid grid-cols-1 md:grid-cols-3 gap-4 w-full" {
            (summary_card("Balance", "balance", summary.balance, balance_style))
            (summary_card("Income", "income", summary.income, "text-green-600 dark:text-green-400"))
            (summary_card("Expenses", "expense", summary.expense, "text-red-600 dark:text-red-400"))
        }
    }
}

fn summary_card(title: &str, id: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) data-summary=(id) {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p class={ "mt-2 text-3xl font-bold " (amount_style) } {
                (format_currency(amount))
            }
        }
    }
}

/// Lists each category in the expense breakdown with its total and its share
/// of the expenses shown.
pub(super) fn category_breakdown_view(breakdown: &[CategoryTotal]) -> Markup {
    let shown_total: f64 = breakdown.iter().map(|total| total.total).sum();

    html! {
        @if !breakdown.is_empty() {
            section class={ "w-full " (CARD_STYLE) } id="category-breakdown" {
                h3 class="text-lg font-semibold mb-2" { "Top expense categories" }

                ul class="divide-y divide-gray-200 dark:divide-gray-700" {
                    @for total in breakdown {
                        li class="flex items-center justify-between py-2" data-breakdown-category=(total.category) {
                            span class=(CATEGORY_BADGE_STYLE) { (total.category) }
                            span class="text-sm" {
                                (format_currency(total.total))
                                span class="ml-2 text-gray-500 dark:text-gray-400" {
                                    (percentage_of(total.total, shown_total)) "%"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

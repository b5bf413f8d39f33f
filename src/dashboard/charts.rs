//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for the user's transactions:
//! - **Expenses by category**: pie chart of the largest expense categories
//! - **Monthly overview**: income and expenses side by side for recent months
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript initialization
//! code. A chart without data is replaced by a short message.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{CategoryTotal, MonthlyTotals},
    html::{CARD_STYLE, HeadElement},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The title shown above the empty state message.
    pub title: &'static str,
    /// The ECharts configuration as a JSON string, `None` if there is no data to chart.
    pub options: Option<String>,
    /// The message to show instead of the chart when there is no data.
    pub empty_message: &'static str,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    @if chart.options.is_some() {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    } @else {
                        div
                            id=(chart.id)
                            class={ "min-h-[380px] flex flex-col " (CARD_STYLE) }
                            data-empty-chart
                        {
                            h3 class="text-lg font-semibold" { (chart.title) }
                            p class="m-auto text-gray-600 dark:text-gray-400" { (chart.empty_message) }
                        }
                    }
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the dashboard charts that
/// have data.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .filter_map(|chart| chart.options.as_ref().map(|options| (chart.id, options)))
        .map(|(id, options)| {
            let options = escape_script_text(options);
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{id}");
                    const chart = echarts.init(chartDom);
                    const option = {options};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Make chart options safe to inline in a `<script>` element.
///
/// Category names are user input and end up in JSON strings, so a name like
/// `</script>` would otherwise close the element early. `\u003c` decodes back
/// to `<` inside a JavaScript string.
fn escape_script_text(options: &str) -> String {
    options.replace('<', "\\u003c")
}

/// A pie chart of the expense breakdown, `None` if there are no expenses.
pub(super) fn category_breakdown_chart(breakdown: &[CategoryTotal]) -> Option<Chart> {
    if breakdown.is_empty() {
        return None;
    }

    let data: Vec<(f64, String)> = breakdown
        .iter()
        .map(|total| (total.total, total.category.to_string()))
        .collect();

    Some(
        Chart::new()
            .title(
                Title::new()
                    .text("Expenses by category")
                    .subtext("Top categories by amount spent"),
            )
            .tooltip(
                Tooltip::new()
                    .trigger(Trigger::Item)
                    .value_formatter(currency_formatter()),
            )
            .legend(Legend::new().bottom("0%"))
            .series(
                Pie::new()
                    .name("Expenses")
                    .radius(vec!["40%", "65%"])
                    .center(vec!["50%", "50%"])
                    .data(data),
            ),
    )
}

/// A bar chart of income and expenses per month, `None` if there are no
/// transactions.
pub(super) fn monthly_overview_chart(series: &[MonthlyTotals]) -> Option<Chart> {
    if series.is_empty() {
        return None;
    }

    let labels: Vec<String> = series
        .iter()
        .map(|totals| totals.label().to_owned())
        .collect();
    let income: Vec<f64> = series.iter().map(|totals| totals.income).collect();
    let expenses: Vec<f64> = series.iter().map(|totals| totals.expense).collect();

    Some(
        Chart::new()
            .title(
                Title::new()
                    .text("Monthly overview")
                    .subtext("Income and expenses for recent months"),
            )
            .tooltip(currency_tooltip())
            .legend(Legend::new().right("4%"))
            .grid(
                Grid::new()
                    .left("3%")
                    .right("4%")
                    .bottom("3%")
                    .top(80)
                    .contain_label(true),
            )
            .x_axis(Axis::new().type_(AxisType::Category).data(labels))
            .y_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .axis_label(AxisLabel::new().formatter(currency_formatter())),
            )
            .series(
                Bar::new()
                    .name("Income")
                    .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                    .data(income),
            )
            .series(
                Bar::new()
                    .name("Expenses")
                    .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                    .data(expenses),
            ),
    )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use maud::html;
    use scraper::{Html, Selector};

    use crate::{
        dashboard::aggregation::{CategoryTotal, MonthlyTotals},
        html::HeadElement,
        transaction::{Category, YearMonth},
    };

    use super::{
        DashboardChart, category_breakdown_chart, charts_script, charts_view,
        monthly_overview_chart,
    };

    #[test]
    fn no_data_gives_no_charts() {
        assert!(category_breakdown_chart(&[]).is_none());
        assert!(monthly_overview_chart(&[]).is_none());
    }

    #[test]
    fn pie_chart_contains_categories() {
        let breakdown = [CategoryTotal {
            category: Category::new_unchecked("Food"),
            total: 80.0,
        }];

        let options = category_breakdown_chart(&breakdown).unwrap().to_string();

        assert!(options.contains("\"pie\""), "got {options}");
        assert!(options.contains("Food"), "got {options}");
    }

    #[test]
    fn bar_chart_has_income_and_expense_series() {
        let series = [MonthlyTotals {
            month: "2025-10".parse::<YearMonth>().unwrap(),
            income: 1000.0,
            expense: 80.0,
        }];

        let options = monthly_overview_chart(&series).unwrap().to_string();

        assert!(options.contains("Income"), "got {options}");
        assert!(options.contains("Expenses"), "got {options}");
        assert!(options.contains("Oct"), "got {options}");
    }

    #[test]
    fn category_names_cannot_close_the_script() {
        let breakdown = [CategoryTotal {
            category: Category::new_unchecked("</script><img src=x onerror=alert(1)>"),
            total: 5.0,
        }];
        let charts = [DashboardChart {
            id: "category-chart",
            title: "Expenses by category",
            options: category_breakdown_chart(&breakdown).map(|chart| chart.to_string()),
            empty_message: "No expenses yet",
        }];

        let HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("want an inline script");
        };
        let rendered = html! { script { (script) } }.into_string();

        assert_eq!(rendered.matches("</script>").count(), 1, "got {rendered}");
        assert!(script.0.contains(r"\u003c/script>"), "got {}", script.0);
        let fragment = Html::parse_fragment(&rendered);
        assert!(
            fragment
                .select(&Selector::parse("img").unwrap())
                .next()
                .is_none()
        );
    }

    #[test]
    fn empty_chart_shows_message_and_no_script() {
        let charts = [
            DashboardChart {
                id: "category-chart",
                title: "Expenses by category",
                options: None,
                empty_message: "No expenses yet",
            },
            DashboardChart {
                id: "monthly-chart",
                title: "Monthly overview",
                options: Some("{}".to_owned()),
                empty_message: "No transactions yet",
            },
        ];

        let html = Html::parse_fragment(&charts_view(&charts).into_string());
        let empty: Vec<_> = html
            .select(&Selector::parse("[data-empty-chart]").unwrap())
            .collect();
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].value().attr("id"), Some("category-chart"));
        assert!(empty[0].text().collect::<String>().contains("No expenses yet"));

        let HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("want an inline script");
        };
        assert!(script.0.contains("monthly-chart"));
        assert!(!script.0.contains("category-chart"));
    }
}

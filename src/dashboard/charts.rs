//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the expense summaries:
//! - **Expenses by Category**: A pie chart of the total spent per category
//! - **Expenses by Day**: A bar chart of the total spent per calendar day
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with its HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::transaction::{CategoryTotal, DailyTotal};

/// The text shown in place of a chart with no data.
pub(super) const NO_DATA_MESSAGE: &str = "No expense data for this period.";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string, or `None` if there is nothing to plot.
    pub options: Option<String>,
}

/// Build the pie chart of expenses per category.
pub(super) fn category_chart(totals: &[CategoryTotal]) -> DashboardChart {
    DashboardChart {
        id: "category-chart",
        options: (!totals.is_empty()).then(|| category_pie_chart(totals).to_string()),
    }
}

/// Build the bar chart of expenses per day.
pub(super) fn daily_chart(totals: &[DailyTotal]) -> DashboardChart {
    DashboardChart {
        id: "daily-chart",
        options: (!totals.is_empty()).then(|| daily_bar_chart(totals).to_string()),
    }
}

/// Renders the charts in a grid, with a placeholder message for charts without data.
///
/// Each chart is followed by the script that initializes it, so the charts
/// are drawn when HTMX swaps the markup into the page.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
        {
            @for chart in charts {
                @match &chart.options {
                    Some(options) => {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}

                        script { (chart_script(chart.id, options)) }
                    }
                    None => {
                        div
                            id=(chart.id)
                            class="flex items-center justify-center min-h-[120px]
                                rounded border border-dashed border-gray-300
                                dark:border-gray-600 text-gray-500 dark:text-gray-400"
                        {
                            p { (NO_DATA_MESSAGE) }
                        }
                    }
                }
            }
        }
    )
}

fn chart_script(id: &str, options: &str) -> PreEscaped<String> {
    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{id}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', () => chart.resize());

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#
    ))
}

fn category_pie_chart(totals: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, String)> = totals
        .iter()
        .map(|total| (total.total_amount, total.category.clone()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(Pie::new().name("Expenses").data(data))
}

fn daily_bar_chart(totals: &[DailyTotal]) -> Chart {
    let labels: Vec<String> = totals.iter().map(|total| total.date.to_string()).collect();
    let values: Vec<f64> = totals.iter().map(|total| total.total_amount).collect();

    Chart::new()
        .title(Title::new().text("Expenses by Day"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Expenses").data(values))
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

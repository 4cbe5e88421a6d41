//! Duration of Relationship layout

use crate::data::{DurationData, ProductMix};
use crate::error::Result;
use crate::format::{format_count, format_percent, format_value, ValueUnit};
use crate::report::ReportKind;

use super::{ChartKind, ChartPoint, ChartSpec, Panel, ReportPage, StatCard};

pub const CUSTOMERS_CHART: &str = "Customers by Relationship Duration";
pub const PREMIUM_CHART: &str = "Average Premium by Duration";
pub const BREAKDOWN_PANEL: &str = "Duration Breakdown";

pub(super) fn build(data: &DurationData, unit: ValueUnit, show_products: bool) -> Result<ReportPage> {
    let mut page = ReportPage::new(
        ReportKind::DurationOfRelationship,
        "How long customers have stayed, and how much they hold",
        unit,
    );

    page.stats.push(
        StatCard::new("Total Customers", format_count(data.total_customers))
            .with_detail(format!("{} duration bands", data.buckets.len())),
    );
    page.stats.push(
        StatCard::new("5+ Year Customers", format_percent(data.long_tenure_percent()))
            .with_detail("of the customer base"),
    );
    if let Some(longest) = data.buckets.last() {
        page.stats.push(
            StatCard::new(
                format!("Avg Premium ({})", longest.range),
                format_value(longest.avg_premium, unit)?,
            )
            .with_detail(format!("{:.1} products on average", longest.avg_products)),
        );
    }
    page.stats.push(StatCard::new(
        "Avg Products / Customer",
        format!("{:.2}", data.average_products()),
    ));

    page.charts.push(customers_chart(data, show_products));

    let mut premium = ChartSpec::new(PREMIUM_CHART, ChartKind::Area)
        .with_series(["Avg Premium"])
        .with_axes("Relationship", "Premium");
    for bucket in &data.buckets {
        let value = format_value(bucket.avg_premium, unit)?;
        premium.push(
            ChartPoint::new(&bucket.range, vec![bucket.avg_premium], value.clone()).with_tooltip(
                vec![
                    bucket.range.clone(),
                    format!("Avg premium: {}", value),
                    format!("Avg products: {:.1}", bucket.avg_products),
                ],
            ),
        );
    }
    page.charts.push(premium);

    let mut breakdown = Panel::new(
        BREAKDOWN_PANEL,
        ["Duration", "Customers", "Share", "Avg Premium", "Avg Products", "1 / 2 / 3+"],
    );
    for bucket in &data.buckets {
        let mix = bucket.product_mix;
        breakdown.push_row(vec![
            bucket.range.clone(),
            format_count(bucket.customers),
            format_percent(bucket.percent),
            format_value(bucket.avg_premium, unit)?,
            format!("{:.1}", bucket.avg_products),
            format!("{} / {} / {}", mix.one, mix.two, mix.three_plus),
        ]);
    }
    page.panels.push(breakdown);

    page.insights = vec![
        "Premium per customer rises steadily with tenure; 10+ year customers pay roughly seven times new joiners.".to_string(),
        "Half of all customers have been with us for under three years and mostly hold a single product.".to_string(),
        "Customers crossing the 3-year mark are the best window for a second product.".to_string(),
        "Long-tenure customers hold 3+ products in the majority of cases; protect them with loyalty benefits.".to_string(),
    ];

    Ok(page)
}

/// Stacked by product count when `show_products` is set, flat otherwise.
/// Per-bucket totals are the same either way.
fn customers_chart(data: &DurationData, show_products: bool) -> ChartSpec {
    let chart = if show_products {
        ChartSpec::new(CUSTOMERS_CHART, ChartKind::StackedBar).with_series(ProductMix::LABELS)
    } else {
        ChartSpec::new(CUSTOMERS_CHART, ChartKind::Bar).with_series(["Customers"])
    };
    let mut chart = chart.with_axes("Relationship", "Customers");

    for bucket in &data.buckets {
        let mut tooltip = vec![
            bucket.range.clone(),
            format!(
                "Customers: {} ({})",
                format_count(bucket.customers),
                format_percent(bucket.percent)
            ),
        ];

        let values = if show_products {
            let mix = bucket.product_mix.as_array();
            for (label, count) in ProductMix::LABELS.iter().zip(mix.iter()) {
                tooltip.push(format!("{}: {}", label, format_count(*count)));
            }
            mix.iter().map(|&count| count as f64).collect()
        } else {
            vec![bucket.customers as f64]
        };

        chart.push(
            ChartPoint::new(&bucket.range, values, format_count(bucket.customers))
                .with_tooltip(tooltip),
        );
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_switches_chart_kind() {
        let data = DurationData::sample();
        let stacked = customers_chart(&data, true);
        let flat = customers_chart(&data, false);

        assert_eq!(stacked.kind, ChartKind::StackedBar);
        assert_eq!(stacked.series.len(), 3);
        assert_eq!(flat.kind, ChartKind::Bar);
        assert_eq!(flat.series.len(), 1);
        assert_eq!(stacked.totals(), flat.totals());
    }

    #[test]
    fn test_breakdown_panel() {
        let page = build(&DurationData::sample(), ValueUnit::Lakh, true).unwrap();
        let panel = page.panel(BREAKDOWN_PANEL).unwrap();
        assert_eq!(panel.rows.len(), 5);
        assert_eq!(panel.cell("10+ years", "Avg Premium"), Some("₹1.25"));
        assert_eq!(panel.cell("< 1 year", "1 / 2 / 3+"), Some("1320 / 240 / 40"));
    }

    #[test]
    fn test_tooltips_follow_toggle() {
        let data = DurationData::sample();
        let stacked = customers_chart(&data, true);
        assert_eq!(stacked.tooltip(0).unwrap().len(), 5);
        let flat = customers_chart(&data, false);
        assert_eq!(flat.tooltip(0).unwrap().len(), 2);
    }
}

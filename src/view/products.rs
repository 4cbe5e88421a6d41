//! Number of Products Purchased layout

use crate::data::ProductsData;
use crate::error::Result;
use crate::format::{format_count, format_percent, format_value, ValueUnit};
use crate::report::ReportKind;

use super::{ChartKind, ChartPoint, ChartSpec, Panel, ReportPage, StatCard};

pub(super) fn build(data: &ProductsData, unit: ValueUnit) -> Result<ReportPage> {
    let mut page = ReportPage::new(
        ReportKind::ProductsPurchased,
        "How many policies each customer holds",
        unit,
    );

    page.stats.push(
        StatCard::new("Avg Products / Customer", format!("{:.2}", data.average_products()))
            .with_detail(format!("{} customers", format_count(data.total_customers))),
    );
    page.stats.push(
        StatCard::new("Multi-Product Customers", format_percent(data.multi_product_percent()))
            .with_detail("hold two or more"),
    );
    if let Some(single) = data.categories.first() {
        page.stats.push(
            StatCard::new("Single-Product Customers", format_count(single.customers))
                .with_detail(format!("{} retention", format_percent(single.retention_rate))),
        );
    }
    if let Some(most) = data.categories.last() {
        page.stats.push(
            StatCard::new(format!("{} Retention", most.label), format_percent(most.retention_rate))
                .with_detail(format!("avg premium {}", format_value(most.avg_premium, unit)?)),
        );
    }

    let mut share = ChartSpec::new("Customers by Product Count", ChartKind::Pie)
        .with_series(["Customers"]);
    let mut retention = ChartSpec::new("Retention by Product Count", ChartKind::Bar)
        .with_series(["Retention"])
        .with_axes("Products held", "Retention %");
    let mut categories = Panel::new(
        "Product Count Breakdown",
        ["Products", "Customers", "Share", "Avg Premium", "Retention", "Avg Tenure"],
    );

    for category in &data.categories {
        let premium = format_value(category.avg_premium, unit)?;
        let tooltip = vec![
            category.label.clone(),
            format!(
                "Customers: {} ({})",
                format_count(category.customers),
                format_percent(category.percent)
            ),
            format!("Avg premium: {}", premium),
            format!("Retention: {}", format_percent(category.retention_rate)),
        ];

        share.push(
            ChartPoint::new(
                &category.label,
                vec![category.customers as f64],
                format_percent(category.percent),
            )
            .with_tooltip(tooltip.clone()),
        );
        retention.push(
            ChartPoint::new(
                &category.label,
                vec![category.retention_rate],
                format_percent(category.retention_rate),
            )
            .with_tooltip(tooltip),
        );
        categories.push_row(vec![
            category.label.clone(),
            format_count(category.customers),
            format_percent(category.percent),
            premium,
            format_percent(category.retention_rate),
            format!("{:.1} yrs", category.avg_tenure_years),
        ]);
    }

    let mut combinations = Panel::new(
        "Popular Product Combinations",
        ["Combination", "Customers", "Avg Premium"],
    );
    for combination in &data.top_combinations {
        combinations.push_row(vec![
            combination.products.clone(),
            format_count(combination.customers),
            format_value(combination.avg_premium, unit)?,
        ]);
    }

    page.charts = vec![share, retention];
    page.panels = vec![categories, combinations];

    page.insights = vec![
        "40% of customers hold a single product; they are the largest cross-sell pool.".to_string(),
        "Retention climbs from 64% with one product to 96% with four or more.".to_string(),
        "Motor + Health is the most common bundle; offer it as a packaged plan.".to_string(),
        "Customers with 4+ products pay ten times the premium of single-product customers.".to_string(),
    ];

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_render_to_hundred() {
        let page = build(&ProductsData::sample(), ValueUnit::Lakh).unwrap();
        let pie = page.chart("Customers by Product Count").unwrap();
        let shares: f64 = ProductsData::sample().categories.iter().map(|c| c.percent).sum();
        assert_eq!(format_percent(shares), "100.0%");
        assert_eq!(pie.points.len(), 4);
    }

    #[test]
    fn test_stat_cards() {
        let page = build(&ProductsData::sample(), ValueUnit::Lakh).unwrap();
        assert_eq!(page.stats[0].value, "2.01");
        assert_eq!(page.stats[1].value, "60.0%");
        assert_eq!(page.stats[2].value, "3,200");
        assert_eq!(page.stats[3].detail.as_deref(), Some("avg premium ₹1.62"));
    }
}

//! Cross-Sell / Upsell Potential layout

use crate::data::{CrossSellData, Level};
use crate::error::Result;
use crate::format::{format_count, format_percent, format_value, ValueUnit};
use crate::report::ReportKind;

use super::{ChartKind, ChartPoint, ChartSpec, Panel, ReportPage, StatCard};

pub(super) fn build(data: &CrossSellData, unit: ValueUnit) -> Result<ReportPage> {
    let mut page = ReportPage::new(
        ReportKind::CrossSellPotential,
        "Products customers do not hold yet, and what selling them is worth",
        unit,
    );

    page.stats.push(
        StatCard::new("Total Opportunity", format_value(data.total_opportunity(), unit)?)
            .with_detail(format!("{} initiatives", data.opportunities.len())),
    );
    page.stats.push(
        StatCard::new("Expected Conversions", format_count(data.expected_conversions()))
            .with_detail("customers"),
    );
    page.stats.push(
        StatCard::new("Avg Penetration", format_percent(data.average_penetration()))
            .with_detail(format!("across {} products", data.products.len())),
    );
    let high_priority = data
        .products
        .iter()
        .filter(|p| p.priority == Level::High)
        .count();
    page.stats.push(StatCard::new("High-Priority Products", high_priority.to_string()));

    let mut penetration = ChartSpec::new("Product Penetration", ChartKind::Bar)
        .with_series(["Penetration"])
        .with_axes("Product", "Penetration %");
    let mut value_map = ChartSpec::new("Penetration vs Avg Value", ChartKind::Scatter)
        .with_series(["Products"])
        .with_axes("Penetration %", "Avg value");
    let mut products = Panel::new(
        "Product Penetration",
        ["Product", "Holders", "Penetration", "Potential", "Avg Value", "Priority"],
    );

    for product in &data.products {
        let avg_value = format_value(product.avg_value, unit)?;
        let tooltip = vec![
            product.product.clone(),
            format!(
                "Holders: {} of {}",
                format_count(product.current_customers),
                format_count(product.total_customers)
            ),
            format!("Penetration: {}", format_percent(product.penetration_percent)),
            format!("Cross-sell potential: {}", format_count(product.cross_sell_potential)),
            format!("Avg value: {}", avg_value),
        ];

        penetration.push(
            ChartPoint::new(
                &product.product,
                vec![product.penetration_percent],
                format_percent(product.penetration_percent),
            )
            .with_tooltip(tooltip.clone()),
        );
        value_map.push(
            ChartPoint::new(
                &product.product,
                vec![product.penetration_percent, product.avg_value],
                avg_value.clone(),
            )
            .with_tooltip(tooltip),
        );
        products.push_row(vec![
            product.product.clone(),
            format_count(product.current_customers),
            format_percent(product.penetration_percent),
            format_count(product.cross_sell_potential),
            avg_value,
            product.priority.to_string(),
        ]);
    }

    let mut segments = Panel::new(
        "Customer Segments",
        [
            "Segment",
            "Customers",
            "Current Spend",
            "Potential Spend",
            "Uplift",
            "Probability",
            "Timeframe",
            "Target Products",
        ],
    );
    for segment in &data.segments {
        segments.push_row(vec![
            segment.segment.clone(),
            format_count(segment.customers),
            format_value(segment.current_spend, unit)?,
            format_value(segment.potential_spend, unit)?,
            format_percent(segment.uplift_percent),
            format_percent(segment.probability),
            segment.timeframe.clone(),
            segment.target_products.join(", "),
        ]);
    }

    let mut opportunity_chart = ChartSpec::new("Revenue Opportunity", ChartKind::Bar)
        .with_series(["Opportunity"])
        .with_axes("Initiative", "Revenue");
    let mut opportunities = Panel::new(
        "Revenue Opportunities",
        [
            "Opportunity",
            "Target",
            "Expected",
            "Conversion",
            "Revenue / Customer",
            "Total",
            "Priority",
            "Effort",
            "ROI",
        ],
    );
    for opportunity in &data.opportunities {
        let total = format_value(opportunity.total_opportunity, unit)?;
        let per_customer = format_value(opportunity.revenue_per_customer, unit)?;
        opportunity_chart.push(
            ChartPoint::new(
                &opportunity.opportunity,
                vec![opportunity.total_opportunity],
                total.clone(),
            )
            .with_tooltip(vec![
                opportunity.opportunity.clone(),
                format!(
                    "Expected: {} of {} customers",
                    format_count(opportunity.expected_customers),
                    format_count(opportunity.target_customers)
                ),
                format!("Revenue / customer: {}", per_customer),
                format!("Total: {}", total),
                format!("ROI: {:.0}%", opportunity.roi),
            ]),
        );
        opportunities.push_row(vec![
            opportunity.opportunity.clone(),
            format_count(opportunity.target_customers),
            format_count(opportunity.expected_customers),
            format_percent(opportunity.conversion_rate),
            per_customer,
            total,
            opportunity.priority.to_string(),
            opportunity.effort.to_string(),
            format!("{:.0}%", opportunity.roi),
        ]);
    }

    page.charts = vec![penetration, value_map, opportunity_chart];
    page.panels = vec![products, segments, opportunities];

    page.insights = vec![
        "Life insurance has the highest value per policy but reaches only 30% of customers.".to_string(),
        "Single-product holders are the largest segment and could more than double their spend.".to_string(),
        "Health cover for motor-only customers offers the best ROI at medium effort.".to_string(),
        "Travel and personal accident covers are low-ticket add-ons best sold at renewal.".to_string(),
    ];

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_opportunity_card() {
        let page = build(&CrossSellData::sample(), ValueUnit::Crore).unwrap();
        assert_eq!(page.stats[0].value, "₹4.94");
        assert_eq!(page.stats[1].value, "2,438");
        assert_eq!(page.stats[3].value, "3");
    }

    #[test]
    fn test_segment_panel() {
        let page = build(&CrossSellData::sample(), ValueUnit::Thousands).unwrap();
        let segments = page.panel("Customer Segments").unwrap();
        assert_eq!(segments.rows.len(), 4);
        assert_eq!(segments.cell("Single Product Holders", "Uplift"), Some("153.3%"));
        assert_eq!(
            segments.cell("Single Product Holders", "Potential Spend"),
            Some("₹38.00")
        );
    }

    #[test]
    fn test_charts() {
        let page = build(&CrossSellData::sample(), ValueUnit::Lakh).unwrap();
        assert_eq!(page.charts.len(), 3);
        let scatter = page.chart("Penetration vs Avg Value").unwrap();
        assert_eq!(scatter.kind, ChartKind::Scatter);
        assert_eq!(scatter.points.len(), 6);
    }
}

//! Premium Contribution by Customer layout

use crate::data::ContributionData;
use crate::error::Result;
use crate::format::{format_count, format_growth, format_percent, format_value, ValueUnit};
use crate::report::ReportKind;

use super::{ChartKind, ChartPoint, ChartSpec, Panel, ReportPage, StatCard};

pub(super) fn build(data: &ContributionData, unit: ValueUnit) -> Result<ReportPage> {
    let mut page = ReportPage::new(
        ReportKind::PremiumContribution,
        "Which customers bring in the premium",
        unit,
    );

    page.stats.push(
        StatCard::new("Total Premium", format_value(data.total_premium, unit)?)
            .with_detail(format!("across {} value tiers", data.tiers.len())),
    );
    if let Some(top_tier) = data.tiers.first() {
        page.stats.push(
            StatCard::new(
                format!("{} Contribution", top_tier.name),
                format_percent(top_tier.contribution_percent),
            )
            .with_detail(format!(
                "from {} of customers",
                format_percent(top_tier.percent_of_base)
            )),
        );
    }
    let top_premium = data.top_contributor_premium();
    page.stats.push(
        StatCard::new(
            format!("Top {} Premium", data.top_contributors.len()),
            format_value(top_premium, unit)?,
        )
        .with_detail(format!(
            "{} of total",
            format_percent(share(top_premium, data.total_premium))
        )),
    );
    page.stats.push(
        StatCard::new("Total Customers", format_count(data.total_customers))
            .with_detail("in the book"),
    );

    let mut contribution = ChartSpec::new("Premium Contribution by Tier", ChartKind::Pie)
        .with_series(["Premium"]);
    let mut growth = ChartSpec::new("Premium Growth by Tier", ChartKind::Bar)
        .with_series(["Growth"])
        .with_axes("Tier", "YoY growth %");
    let mut tiers = Panel::new(
        "Value Tiers",
        [
            "Tier",
            "Range",
            "Customers",
            "Share of Base",
            "Total Premium",
            "Avg Premium",
            "Contribution",
            "Growth",
            "Retention",
            "Avg Products",
        ],
    );

    for tier in &data.tiers {
        let total = format_value(tier.total_premium, unit)?;
        let avg = format_value(tier.avg_premium, unit)?;

        contribution.push(
            ChartPoint::new(
                &tier.name,
                vec![tier.total_premium],
                format_percent(tier.contribution_percent),
            )
            .with_tooltip(vec![
                format!("{} ({})", tier.name, tier.range),
                format!("Premium: {}", total),
                format!("Contribution: {}", format_percent(tier.contribution_percent)),
                format!("Customers: {}", format_count(tier.customers)),
            ]),
        );

        growth.push(
            ChartPoint::new(&tier.name, vec![tier.growth_rate], format_growth(tier.growth_rate))
                .with_tooltip(vec![
                    tier.name.clone(),
                    format!("Growth: {}", format_growth(tier.growth_rate)),
                    format!("Retention: {}", format_percent(tier.retention_rate)),
                ]),
        );

        tiers.push_row(vec![
            tier.name.clone(),
            tier.range.clone(),
            format_count(tier.customers),
            format_percent(tier.percent_of_base),
            total,
            avg,
            format_percent(tier.contribution_percent),
            format_growth(tier.growth_rate),
            format_percent(tier.retention_rate),
            format!("{:.1}", tier.avg_products),
        ]);
    }

    let mut leaders = ChartSpec::new("Top Contributors", ChartKind::Bar)
        .with_series(["Premium"])
        .with_axes("Customer", "Premium");
    let mut contributors = Panel::new(
        "Top Contributors",
        ["Customer", "Segment", "Premium", "Products", "Tenure"],
    );
    for contributor in &data.top_contributors {
        let premium = format_value(contributor.premium, unit)?;
        leaders.push(
            ChartPoint::new(&contributor.name, vec![contributor.premium], premium.clone())
                .with_tooltip(vec![
                    contributor.name.clone(),
                    format!("Segment: {}", contributor.segment),
                    format!("Premium: {}", premium),
                    format!("Products: {}", contributor.products),
                ]),
        );
        contributors.push_row(vec![
            contributor.name.clone(),
            contributor.segment.clone(),
            premium,
            contributor.products.to_string(),
            format!("{} yrs", contributor.tenure_years),
        ]);
    }

    page.charts = vec![contribution, growth, leaders];
    page.panels = vec![tiers, contributors];

    page.insights = vec![
        "10% of customers (High Value) contribute 56.3% of total premium.".to_string(),
        "High and Medium Value tiers together bring in 84.3% of premium from 30% of customers.".to_string(),
        "The Basic tier is shrinking and retains under two-thirds of its customers.".to_string(),
        "The top 10 accounts alone are 13.8% of premium; assign dedicated relationship managers.".to_string(),
    ];

    Ok(page)
}

fn share(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_value_contribution_column() {
        let page = build(&ContributionData::sample(), ValueUnit::Crore).unwrap();
        let tiers = page.panel("Value Tiers").unwrap();
        assert_eq!(tiers.cell("High Value", "Contribution"), Some("56.3%"));
        assert_eq!(tiers.cell("High Value", "Total Premium"), Some("₹45.04"));
        assert_eq!(tiers.cell("Basic", "Growth"), Some("-1.3%"));
    }

    #[test]
    fn test_stats() {
        let page = build(&ContributionData::sample(), ValueUnit::Crore).unwrap();
        assert_eq!(page.stats[0].value, "₹80.00");
        assert_eq!(page.stats[1].value, "56.3%");
        assert_eq!(page.stats[2].detail.as_deref(), Some("13.8% of total"));
        assert_eq!(page.stats[3].label, "Total Customers");
        assert_eq!(page.stats[3].value, "8,000");
    }

    #[test]
    fn test_default_unit_groups_premiums() {
        let page = build(&ContributionData::sample(), ValueUnit::Rupees).unwrap();
        let contributors = page.panel("Top Contributors").unwrap();
        assert_eq!(contributors.rows.len(), 10);
        assert_eq!(
            contributors.cell("Sharma Textiles Pvt Ltd", "Premium"),
            Some("₹1,85,00,000")
        );
    }
}

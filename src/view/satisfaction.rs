//! Customer Satisfaction / NPS layout

use crate::data::SatisfactionData;
use crate::error::Result;
use crate::format::{format_count, format_percent, format_value, ValueUnit};
use crate::report::ReportKind;

use super::{ChartKind, ChartPoint, ChartSpec, Panel, ReportPage, StatCard};

fn stars(count: u8) -> String {
    format!("{}★", count)
}

pub(super) fn build(data: &SatisfactionData, unit: ValueUnit) -> Result<ReportPage> {
    let mut page = ReportPage::new(
        ReportKind::CustomerSatisfaction,
        "Star ratings, net promoter score and what satisfaction is worth",
        unit,
    );

    let nps = data.nps();
    page.stats.push(
        StatCard::new("Net Promoter Score", format!("{:+.0}", nps))
            .with_detail("promoters minus detractors"),
    );
    page.stats.push(
        StatCard::new("Average Rating", format!("{:.2} / 5", data.average_rating()))
            .with_detail(format!("{} rated customers", format_count(data.total_customers))),
    );
    page.stats.push(
        StatCard::new("Promoters", format_percent(data.promoter_percent())).with_detail("5★ ratings"),
    );
    page.stats.push(
        StatCard::new("Detractors", format_percent(data.detractor_percent()))
            .with_detail("3★ and below"),
    );

    let mut distribution =
        ChartSpec::new("Rating Distribution", ChartKind::Pie).with_series(["Customers"]);
    let mut value_map = ChartSpec::new("Spend vs Retention by Rating", ChartKind::Scatter)
        .with_series(["Ratings"])
        .with_axes("Avg spend", "Retention %");
    let mut table = Panel::new(
        "Rating Breakdown",
        ["Rating", "Customers", "Share", "Avg Spend", "Satisfaction", "Retention"],
    );

    for rating in &data.ratings {
        let spend = format_value(rating.avg_spend, unit)?;
        let label = stars(rating.stars);

        distribution.push(
            ChartPoint::new(
                &label,
                vec![rating.customers as f64],
                format_percent(rating.percent),
            )
            .with_tooltip(vec![
                format!("{} - {}", label, rating.label),
                format!("Customers: {}", format_count(rating.customers)),
                format!("Share: {}", format_percent(rating.percent)),
            ]),
        );

        value_map.push(
            ChartPoint::new(
                &label,
                vec![rating.avg_spend, rating.retention_rate],
                format_percent(rating.retention_rate),
            )
            .with_tooltip(vec![
                format!("{} - {}", label, rating.label),
                format!("Avg spend: {}", spend),
                format!("Retention: {}", format_percent(rating.retention_rate)),
            ]),
        );

        table.push_row(vec![
            label,
            format_count(rating.customers),
            format_percent(rating.percent),
            spend,
            rating.label.clone(),
            format_percent(rating.retention_rate),
        ]);
    }

    let mut trend = ChartSpec::new("Monthly NPS Trend", ChartKind::Area)
        .with_series(["NPS"])
        .with_axes("Month", "NPS");
    for point in &data.nps_trend {
        trend.push(
            ChartPoint::new(&point.month, vec![point.nps], format!("{:+.1}", point.nps))
                .with_tooltip(vec![point.month.clone(), format!("NPS: {:+.1}", point.nps)]),
        );
    }

    page.charts = vec![distribution, trend, value_map];
    page.panels.push(table);

    page.insights = vec![
        "70% of customers rate us 4★ or higher, but only 5★ ratings count as promoters.".to_string(),
        "NPS has climbed every quarter this year and reached +10 in December.".to_string(),
        "Retention drops sharply below 3★; dissatisfied customers are three times as likely to lapse.".to_string(),
        "Very satisfied customers spend over three times as much as very dissatisfied ones.".to_string(),
    ];

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nps_card() {
        let page = build(&SatisfactionData::sample(), ValueUnit::Crore).unwrap();
        assert_eq!(page.stats[0].value, "+10");
        assert_eq!(page.stats[1].value, "3.89 / 5");
    }

    #[test]
    fn test_distribution_counts() {
        let page = build(&SatisfactionData::sample(), ValueUnit::Crore).unwrap();
        let pie = page.chart("Rating Distribution").unwrap();
        assert_eq!(pie.kind, ChartKind::Pie);
        assert_eq!(pie.totals().iter().sum::<f64>(), 8_000.0);
    }

    #[test]
    fn test_scatter_points_are_pairs() {
        let page = build(&SatisfactionData::sample(), ValueUnit::Thousands).unwrap();
        let scatter = page.chart("Spend vs Retention by Rating").unwrap();
        assert!(scatter.points.iter().all(|p| p.values.len() == 2));
        assert_eq!(
            page.panel("Rating Breakdown").unwrap().cell("5★", "Avg Spend"),
            Some("₹68.00")
        );
    }
}

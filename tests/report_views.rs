// Report view tests against the library API

use custinsight::data::{Datasets, TOTAL_CUSTOMERS};
use custinsight::error::{FormatError, InsightError};
use custinsight::filters::ReportFilters;
use custinsight::format::{format_percent, format_value, ValueUnit};
use custinsight::report::ReportKind;
use custinsight::view::{ChartKind, ReportLayout, ReportProps, ReportView};

fn props(report: &str, unit: &str) -> ReportProps {
    ReportProps {
        value_unit: unit.to_string(),
        selected_report_type: report.to_string(),
        current_filters: None,
    }
}

#[test]
fn test_scaled_units_format_hundred_million() {
    let amount = 100_000_000.0;
    assert_eq!(format_value(amount, ValueUnit::from_label("Crore")).unwrap(), "₹10.00");
    assert_eq!(format_value(amount, ValueUnit::from_label("Lakh")).unwrap(), "₹1000.00");
    assert_eq!(
        format_value(amount, ValueUnit::from_label("Thousands")).unwrap(),
        "₹100000.00"
    );
    assert_eq!(
        format_value(amount, ValueUnit::from_label("anything else")).unwrap(),
        "₹10,00,00,000"
    );
}

#[test]
fn test_formatter_edge_cases() {
    assert_eq!(format_value(-5_000.0, ValueUnit::Thousands).unwrap(), "-₹5.00");
    assert_eq!(format_value(-0.001, ValueUnit::Crore).unwrap(), "₹0.00");
    assert!(matches!(
        format_value(f64::NAN, ValueUnit::Crore),
        Err(FormatError::NonFinite(_))
    ));
    assert!(matches!(
        format_value(f64::INFINITY, ValueUnit::Lakh),
        Err(FormatError::NonFinite(_))
    ));
}

#[test]
fn test_unknown_report_renders_placeholder() {
    let datasets = Datasets::builtin();
    let view = ReportView::new(&datasets, &props("Nonexistent Report", "Crore"));
    let layout = view.render().expect("unknown reports never fail");
    assert!(layout.is_placeholder());
    assert!(layout.charts().is_empty());
}

#[test]
fn test_duration_toggle_keeps_bucket_totals() {
    let datasets = Datasets::builtin();
    let p = props("Duration of Relationship", "Lakh");

    let split = ReportView::new(&datasets, &p).with_show_products(true).render().unwrap();
    let flat = ReportView::new(&datasets, &p).with_show_products(false).render().unwrap();

    let split_chart = &split.charts()[0];
    let flat_chart = &flat.charts()[0];
    assert_eq!(split_chart.kind, ChartKind::StackedBar);
    assert_eq!(flat_chart.kind, ChartKind::Bar);
    assert_eq!(split_chart.series.len(), 3);
    assert_eq!(flat_chart.series.len(), 1);
    assert_eq!(split_chart.totals(), flat_chart.totals());

    let total: f64 = flat_chart.totals().iter().sum();
    assert_eq!(total, TOTAL_CUSTOMERS as f64);
}

#[test]
fn test_bucket_counts_sum_to_population() {
    let d = Datasets::builtin();
    let total = TOTAL_CUSTOMERS;
    assert_eq!(d.contribution.tiers.iter().map(|t| t.customers).sum::<u64>(), total);
    assert_eq!(d.satisfaction.ratings.iter().map(|r| r.customers).sum::<u64>(), total);
    assert_eq!(d.duration.buckets.iter().map(|b| b.customers).sum::<u64>(), total);
    assert_eq!(d.communication.channels.iter().map(|c| c.customers).sum::<u64>(), total);
    assert_eq!(d.products.categories.iter().map(|c| c.customers).sum::<u64>(), total);
    assert_eq!(d.cross_sell.segments.iter().map(|s| s.customers).sum::<u64>(), total);
    assert!(d.validate().is_empty());
}

#[test]
fn test_high_value_contribution() {
    let datasets = Datasets::builtin();
    let view = ReportView::new(&datasets, &props("Premium Contribution by Customer", "Crore"));
    let layout = view.render().unwrap();
    let page = layout.page().unwrap();
    let tiers = page.panel("Value Tiers").unwrap();
    assert_eq!(tiers.cell("High Value", "Contribution"), Some("56.3%"));
}

#[test]
fn test_product_category_shares_sum_to_hundred() {
    let datasets = Datasets::builtin();
    let shares: f64 = datasets.products.categories.iter().map(|c| c.percent).sum();
    assert_eq!(format_percent(shares), "100.0%");

    let view = ReportView::new(&datasets, &props("Number of Products Purchased", "Lakh"));
    let layout = view.render().unwrap();
    let pie = &layout.charts()[0];
    assert_eq!(pie.kind, ChartKind::Pie);
    assert_eq!(pie.points.len(), datasets.products.categories.len());
}

#[test]
fn test_nps_is_ten() {
    let datasets = Datasets::builtin();
    assert!((datasets.satisfaction.nps() - 10.0).abs() < 1e-9);

    let view = ReportView::new(&datasets, &props("Customer Satisfaction / NPS", "Crore"));
    let layout = view.render().unwrap();
    let page = layout.page().unwrap();
    assert!(page.stats.iter().any(|s| s.value == "+10"));
}

#[test]
fn test_every_point_has_a_tooltip() {
    let datasets = Datasets::builtin();
    for kind in ReportKind::ALL.iter() {
        for unit in ValueUnit::ALL {
            let view = ReportView::new(&datasets, &props(kind.title(), unit.label()));
            let layout = view.render().unwrap();
            for chart in layout.charts() {
                for point in &chart.points {
                    assert!(
                        !point.tooltip.is_empty(),
                        "{} / {} / {} has no tooltip",
                        kind,
                        chart.title,
                        point.label
                    );
                }
            }
        }
    }
}

#[test]
fn test_non_finite_dataset_value_propagates() {
    let mut datasets = Datasets::builtin();
    datasets.contribution.total_premium = f64::NAN;
    let view = ReportView::new(&datasets, &props("Premium Contribution by Customer", "Crore"));
    assert!(matches!(
        view.render(),
        Err(InsightError::Format(FormatError::NonFinite(_)))
    ));

    // Other reports are unaffected
    let view = ReportView::new(&datasets, &props("Duration of Relationship", "Crore"));
    assert!(view.render().is_ok());
}

#[test]
fn test_huge_loaded_counts_render_and_validate() {
    let mut datasets = Datasets::builtin();
    datasets.contribution.tiers[0].customers = u64::MAX;
    datasets.duration.buckets[0].customers = u64::MAX;
    datasets.duration.buckets[0].product_mix.one = u64::MAX;
    datasets.satisfaction.ratings[0].customers = u64::MAX;
    datasets.products.categories[0].customers = u64::MAX;
    datasets.cross_sell.opportunities[0].expected_customers = u64::MAX;
    datasets.cross_sell.opportunities[1].expected_customers = u64::MAX;
    datasets.communication.channels[0].customers = u64::MAX;
    datasets.communication.channels[1].customers = u64::MAX;
    datasets.communication.monthly_touchpoints[0].volumes = vec![u64::MAX; 5];

    let issues = datasets.validate();
    assert!(issues.iter().any(|issue| issue.dataset == "duration"));
    assert!(issues.iter().any(|issue| issue.dataset == "communication"));

    for kind in ReportKind::ALL.iter() {
        for show_products in [true, false] {
            let view = ReportView::new(&datasets, &props(kind.title(), "Rupees"))
                .with_show_products(show_products);
            assert!(view.render().is_ok(), "{} failed to render", kind);
        }
    }

    let view = ReportView::new(&datasets, &props("Communication & Touchpoints", "Crore"));
    let layout = view.render().unwrap();
    let page = layout.page().unwrap();
    let reached = page.stats.iter().find(|s| s.label == "Customers Reached").unwrap();
    // Two saturated channels plus the remaining 3,760 customers
    assert_eq!(reached.value, "3,68,93,48,81,47,41,91,06,990");
}

#[test]
fn test_full_view_carries_filters() {
    let datasets = Datasets::builtin();
    let filters = ReportFilters {
        entity: Some("Retail".into()),
        report_type: "Cross-Sell / Upsell Potential".into(),
        location: Some("Pune".into()),
        value_unit: "Thousands".into(),
        ..Default::default()
    };
    let p = ReportProps {
        value_unit: "Thousands".into(),
        selected_report_type: "cross-sell-potential".into(),
        current_filters: Some(filters.clone()),
    };
    let view = ReportView::new(&datasets, &p);
    assert_eq!(view.kind(), &ReportKind::CrossSellPotential);

    let requests = view.full_view_requests().unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.filters == filters));
    assert_eq!(requests[1].chart_type.as_deref(), Some("scatter"));
}

#[test]
fn test_layout_serializes() {
    let datasets = Datasets::builtin();
    let view = ReportView::new(&datasets, &props("Communication & Touchpoints", "Rupees"));
    let layout = view.render().unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    let back: ReportLayout = serde_json::from_str(&json).unwrap();
    let (page, back) = (layout.page().unwrap(), back.page().unwrap());
    assert_eq!(back.kind, ReportKind::CommunicationTouchpoints);
    assert_eq!(back.stats, page.stats);
    assert_eq!(back.panels, page.panels);
    assert_eq!(back.charts.len(), page.charts.len());
}

//! Cross-sell and upsell potential: product penetration, segments and
//! revenue opportunities

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{check_share, check_total, sum_counts, DatasetIssue, TOTAL_CUSTOMERS};

const DATASET: &str = "cross_sell";

/// Three-step rating used for priority and effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPenetration {
    pub product: String,
    pub current_customers: u64,
    pub total_customers: u64,
    pub penetration_percent: f64,
    /// Existing customers without the product who are likely buyers
    pub cross_sell_potential: u64,
    pub avg_value: f64,
    pub priority: Level,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub segment: String,
    pub customers: u64,
    pub current_spend: f64,
    pub potential_spend: f64,
    pub uplift_percent: f64,
    /// Conversion probability, percent
    pub probability: f64,
    pub timeframe: String,
    pub target_products: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueOpportunity {
    pub opportunity: String,
    pub target_customers: u64,
    pub expected_customers: u64,
    pub conversion_rate: f64,
    pub revenue_per_customer: f64,
    pub total_opportunity: f64,
    pub priority: Level,
    pub effort: Level,
    /// Return on campaign spend, percent
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSellData {
    pub total_customers: u64,
    pub products: Vec<ProductPenetration>,
    pub segments: Vec<CustomerSegment>,
    pub opportunities: Vec<RevenueOpportunity>,
}

impl CrossSellData {
    pub fn sample() -> Self {
        let product = |name: &str, current: u64, potential: u64, avg_value: f64, priority: Level| {
            ProductPenetration {
                product: name.to_string(),
                current_customers: current,
                total_customers: TOTAL_CUSTOMERS,
                penetration_percent: current as f64 / TOTAL_CUSTOMERS as f64 * 100.0,
                cross_sell_potential: potential,
                avg_value,
                priority,
            }
        };

        let segment = |name: &str,
                       customers: u64,
                       current_spend: f64,
                       potential_spend: f64,
                       uplift_percent: f64,
                       probability: f64,
                       timeframe: &str,
                       targets: &[&str]| CustomerSegment {
            segment: name.to_string(),
            customers,
            current_spend,
            potential_spend,
            uplift_percent,
            probability,
            timeframe: timeframe.to_string(),
            target_products: targets.iter().map(|t| t.to_string()).collect(),
        };

        let opportunity = |name: &str,
                           target: u64,
                           conversion_rate: f64,
                           revenue_per_customer: f64,
                           priority: Level,
                           effort: Level,
                           roi: f64| {
            let expected = (target as f64 * conversion_rate / 100.0).round() as u64;
            RevenueOpportunity {
                opportunity: name.to_string(),
                target_customers: target,
                expected_customers: expected,
                conversion_rate,
                revenue_per_customer,
                total_opportunity: expected as f64 * revenue_per_customer,
                priority,
                effort,
                roi,
            }
        };

        CrossSellData {
            total_customers: TOTAL_CUSTOMERS,
            products: vec![
                product("Motor Insurance", 5_200, 1_400, 18_500.0, Level::High),
                product("Health Insurance", 3_600, 2_200, 32_000.0, Level::High),
                product("Life Insurance", 2_400, 2_600, 45_000.0, Level::High),
                product("Home Insurance", 1_200, 1_900, 12_500.0, Level::Medium),
                product("Travel Insurance", 800, 1_100, 4_500.0, Level::Low),
                product("Personal Accident", 1_600, 2_400, 6_000.0, Level::Medium),
            ],
            segments: vec![
                segment(
                    "Single Product Holders",
                    3_200,
                    15_000.0,
                    38_000.0,
                    153.3,
                    35.0,
                    "3-6 months",
                    &["Health Insurance", "Personal Accident"],
                ),
                segment(
                    "Two Product Holders",
                    2_400,
                    42_000.0,
                    78_000.0,
                    85.7,
                    45.0,
                    "6-9 months",
                    &["Life Insurance", "Home Insurance"],
                ),
                segment(
                    "Multi-Product Loyalists",
                    1_600,
                    95_000.0,
                    140_000.0,
                    47.4,
                    60.0,
                    "6-12 months",
                    &["Life Insurance", "Travel Insurance"],
                ),
                segment(
                    "Premium HNI",
                    800,
                    563_000.0,
                    750_000.0,
                    33.2,
                    55.0,
                    "3-6 months",
                    &["Home Insurance", "Travel Insurance", "Life Insurance"],
                ),
            ],
            opportunities: vec![
                opportunity(
                    "Health cover for motor-only customers",
                    2_200,
                    25.0,
                    32_000.0,
                    Level::High,
                    Level::Medium,
                    320.0,
                ),
                opportunity(
                    "Family life insurance",
                    2_600,
                    18.0,
                    45_000.0,
                    Level::High,
                    Level::High,
                    280.0,
                ),
                opportunity(
                    "Home insurance bundle",
                    1_900,
                    22.0,
                    12_500.0,
                    Level::Medium,
                    Level::Low,
                    210.0,
                ),
                opportunity(
                    "Travel add-on for HNI",
                    1_100,
                    30.0,
                    4_500.0,
                    Level::Low,
                    Level::Low,
                    150.0,
                ),
                opportunity(
                    "Personal accident rider",
                    2_400,
                    28.0,
                    6_000.0,
                    Level::Medium,
                    Level::Low,
                    240.0,
                ),
            ],
        }
    }

    pub fn total_opportunity(&self) -> f64 {
        self.opportunities.iter().map(|o| o.total_opportunity).sum()
    }

    pub fn expected_conversions(&self) -> u128 {
        sum_counts(self.opportunities.iter().map(|o| o.expected_customers))
    }

    pub fn average_penetration(&self) -> f64 {
        if self.products.is_empty() {
            return 0.0;
        }
        self.products.iter().map(|p| p.penetration_percent).sum::<f64>() / self.products.len() as f64
    }

    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        check_total(
            &mut issues,
            DATASET,
            "segment customer counts",
            self.segments.iter().map(|s| s.customers),
            self.total_customers,
        );
        for product in &self.products {
            check_share(
                &mut issues,
                DATASET,
                &format!("{} penetration", product.product),
                product.penetration_percent,
                product.current_customers as f64,
                product.total_customers as f64,
            );
            if u128::from(product.current_customers) + u128::from(product.cross_sell_potential)
                > u128::from(product.total_customers)
            {
                issues.push(DatasetIssue {
                    dataset: DATASET,
                    message: format!(
                        "{} holders plus cross-sell potential exceed the customer base",
                        product.product
                    ),
                });
            }
        }
        for segment in &self.segments {
            check_share(
                &mut issues,
                DATASET,
                &format!("{} uplift", segment.segment),
                segment.uplift_percent,
                segment.potential_spend - segment.current_spend,
                segment.current_spend,
            );
        }
        for opportunity in &self.opportunities {
            let expected = opportunity.expected_customers as f64 * opportunity.revenue_per_customer;
            if (expected - opportunity.total_opportunity).abs() > 0.5 {
                issues.push(DatasetIssue {
                    dataset: DATASET,
                    message: format!(
                        "{} total does not match expected customers x revenue per customer",
                        opportunity.opportunity
                    ),
                });
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_list_sizes() {
        let data = CrossSellData::sample();
        assert_eq!(data.products.len(), 6);
        assert_eq!(data.segments.len(), 4);
        assert_eq!(data.opportunities.len(), 5);
    }

    #[test]
    fn test_opportunity_totals() {
        let data = CrossSellData::sample();
        assert_eq!(data.opportunities[0].expected_customers, 550);
        assert_eq!(data.opportunities[0].total_opportunity, 17_600_000.0);
        assert_eq!(data.expected_conversions(), 2_438);
        assert_eq!(data.total_opportunity(), 49_402_000.0);
    }

    #[test]
    fn test_penetration() {
        let data = CrossSellData::sample();
        assert!((data.products[0].penetration_percent - 65.0).abs() < 1e-9);
        assert!((data.average_penetration() - 30.833).abs() < 0.01);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::High.to_string(), "High");
        assert_eq!(Level::Low.to_string(), "Low");
    }
}

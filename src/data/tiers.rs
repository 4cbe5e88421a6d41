//! Premium contribution by customer value tier

use serde::{Deserialize, Serialize};

use super::{check_percentages, check_share, check_total, DatasetIssue, TOTAL_CUSTOMERS};

const DATASET: &str = "contribution";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTier {
    pub name: String,
    /// Premium band the tier covers, e.g. "> ₹5L"
    pub range: String,
    pub customers: u64,
    pub percent_of_base: f64,
    pub total_premium: f64,
    pub avg_premium: f64,
    pub contribution_percent: f64,
    /// Year-on-year premium growth, percent
    pub growth_rate: f64,
    pub retention_rate: f64,
    pub avg_products: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopContributor {
    pub name: String,
    pub premium: f64,
    pub segment: String,
    pub products: u32,
    pub tenure_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionData {
    pub total_customers: u64,
    pub total_premium: f64,
    pub tiers: Vec<CustomerTier>,
    pub top_contributors: Vec<TopContributor>,
}

impl ContributionData {
    pub fn sample() -> Self {
        let tier = |name: &str,
                    range: &str,
                    customers: u64,
                    percent_of_base: f64,
                    total_premium: f64,
                    contribution_percent: f64,
                    growth_rate: f64,
                    retention_rate: f64,
                    avg_products: f64| CustomerTier {
            name: name.to_string(),
            range: range.to_string(),
            customers,
            percent_of_base,
            total_premium,
            avg_premium: (total_premium / customers as f64).round(),
            contribution_percent,
            growth_rate,
            retention_rate,
            avg_products,
        };

        let contributor = |name: &str, premium: f64, segment: &str, products: u32, tenure_years: u32| {
            TopContributor {
                name: name.to_string(),
                premium,
                segment: segment.to_string(),
                products,
                tenure_years,
            }
        };

        ContributionData {
            total_customers: TOTAL_CUSTOMERS,
            total_premium: 800_000_000.0,
            tiers: vec![
                tier("High Value", "> ₹5L", 800, 10.0, 450_400_000.0, 56.3, 12.5, 94.2, 3.8),
                tier("Medium Value", "₹1L - ₹5L", 1_600, 20.0, 224_000_000.0, 28.0, 8.2, 87.5, 2.6),
                tier("Low Value", "₹25K - ₹1L", 2_800, 35.0, 100_800_000.0, 12.6, 4.7, 76.8, 1.7),
                tier("Basic", "< ₹25K", 2_800, 35.0, 24_800_000.0, 3.1, -1.3, 62.4, 1.2),
            ],
            top_contributors: vec![
                contributor("Sharma Textiles Pvt Ltd", 18_500_000.0, "Corporate", 7, 14),
                contributor("Mehta Logistics Group", 15_200_000.0, "Corporate", 6, 11),
                contributor("Iyer Family Trust", 13_800_000.0, "HNI", 5, 16),
                contributor("Kapoor Hospitality", 12_400_000.0, "Corporate", 6, 9),
                contributor("Desai Pharma Ltd", 11_000_000.0, "Corporate", 5, 8),
                contributor("Nair Constructions", 9_600_000.0, "SME", 4, 12),
                contributor("Rao Agro Exports", 8_900_000.0, "SME", 4, 7),
                contributor("Gupta Retail Chain", 7_700_000.0, "SME", 5, 10),
                contributor("Banerjee Auto Components", 6_900_000.0, "SME", 3, 6),
                contributor("Anand Malhotra", 6_200_000.0, "HNI", 4, 18),
            ],
        }
    }

    /// Combined premium of the top contributors
    pub fn top_contributor_premium(&self) -> f64 {
        self.top_contributors.iter().map(|c| c.premium).sum()
    }

    pub fn tier(&self, name: &str) -> Option<&CustomerTier> {
        self.tiers.iter().find(|tier| tier.name == name)
    }

    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        check_total(
            &mut issues,
            DATASET,
            "tier customer counts",
            self.tiers.iter().map(|t| t.customers),
            self.total_customers,
        );
        check_percentages(
            &mut issues,
            DATASET,
            "tier shares of base",
            self.tiers.iter().map(|t| t.percent_of_base),
        );
        check_percentages(
            &mut issues,
            DATASET,
            "tier contributions",
            self.tiers.iter().map(|t| t.contribution_percent),
        );
        for tier in &self.tiers {
            check_share(
                &mut issues,
                DATASET,
                &format!("{} contribution", tier.name),
                tier.contribution_percent,
                tier.total_premium,
                self.total_premium,
            );
        }
        issues
    }
}

//! Number of products held per customer

use serde::{Deserialize, Serialize};

use super::{check_percentages, check_total, sum_counts, DatasetIssue, TOTAL_CUSTOMERS};

const DATASET: &str = "products";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCountCategory {
    pub label: String,
    pub customers: u64,
    pub percent: f64,
    pub avg_premium: f64,
    pub retention_rate: f64,
    pub avg_tenure_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCombination {
    pub products: String,
    pub customers: u64,
    pub avg_premium: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsData {
    pub total_customers: u64,
    pub categories: Vec<ProductCountCategory>,
    pub top_combinations: Vec<ProductCombination>,
}

impl ProductsData {
    pub fn sample() -> Self {
        let category = |label: &str,
                        customers: u64,
                        percent: f64,
                        avg_premium: f64,
                        retention_rate: f64,
                        avg_tenure_years: f64| ProductCountCategory {
            label: label.to_string(),
            customers,
            percent,
            avg_premium,
            retention_rate,
            avg_tenure_years,
        };

        let combination = |products: &str, customers: u64, avg_premium: f64| ProductCombination {
            products: products.to_string(),
            customers,
            avg_premium,
        };

        ProductsData {
            total_customers: TOTAL_CUSTOMERS,
            categories: vec![
                category("1 Product", 3_200, 40.0, 16_500.0, 64.0, 2.1),
                category("2 Products", 2_400, 30.0, 41_000.0, 81.5, 4.3),
                category("3 Products", 1_520, 19.0, 78_000.0, 90.2, 6.8),
                category("4+ Products", 880, 11.0, 162_000.0, 96.1, 9.4),
            ],
            top_combinations: vec![
                combination("Motor + Health", 1_150, 48_500.0),
                combination("Motor + Personal Accident", 620, 25_000.0),
                combination("Health + Life", 540, 79_000.0),
                combination("Motor + Health + Life", 480, 96_000.0),
                combination("Motor + Home", 310, 31_000.0),
            ],
        }
    }

    /// Customer-weighted product count, counting "4+" as four
    pub fn average_products(&self) -> f64 {
        let customers = sum_counts(self.categories.iter().map(|c| c.customers));
        if customers == 0 {
            return 0.0;
        }
        let weighted: u128 = self
            .categories
            .iter()
            .map(|c| u128::from(leading_count(&c.label)) * u128::from(c.customers))
            .sum();
        weighted as f64 / customers as f64
    }

    /// Share of customers holding more than one product, percent
    pub fn multi_product_percent(&self) -> f64 {
        self.categories
            .iter()
            .filter(|c| leading_count(&c.label) > 1)
            .map(|c| c.percent)
            .sum()
    }

    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        check_total(
            &mut issues,
            DATASET,
            "category customer counts",
            self.categories.iter().map(|c| c.customers),
            self.total_customers,
        );
        check_percentages(
            &mut issues,
            DATASET,
            "category shares",
            self.categories.iter().map(|c| c.percent),
        );
        issues
    }
}

/// Parse the number a category label starts with ("4+ Products" -> 4)
fn leading_count(label: &str) -> u64 {
    label
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_shares_sum_to_hundred() {
        let data = ProductsData::sample();
        assert_eq!(data.categories.len(), 4);
        let total: f64 = data.categories.iter().map(|c| c.percent).sum();
        assert_eq!(format!("{:.1}%", total), "100.0%");
        assert_eq!(data.categories.iter().map(|c| c.customers).sum::<u64>(), 8_000);
    }

    #[test]
    fn test_leading_count() {
        assert_eq!(leading_count("1 Product"), 1);
        assert_eq!(leading_count("4+ Products"), 4);
        assert_eq!(leading_count("Several"), 0);
    }

    #[test]
    fn test_derived_metrics() {
        let data = ProductsData::sample();
        // (3200 + 4800 + 4560 + 3520) / 8000
        assert!((data.average_products() - 2.01).abs() < 1e-9);
        assert!((data.multi_product_percent() - 60.0).abs() < 1e-9);
    }
}

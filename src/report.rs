//! Report kinds and the string-to-kind dispatch

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every report layout the view knows how to build
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    DurationOfRelationship,
    CustomerSatisfaction,
    PremiumContribution,
    CommunicationTouchpoints,
    CrossSellPotential,
    ProductsPurchased,
    /// Anything else; renders the "not implemented" placeholder
    Unsupported(String),
}

impl ReportKind {
    /// Supported kinds in menu order
    pub const ALL: [ReportKind; 6] = [
        ReportKind::DurationOfRelationship,
        ReportKind::CustomerSatisfaction,
        ReportKind::PremiumContribution,
        ReportKind::CommunicationTouchpoints,
        ReportKind::CrossSellPotential,
        ReportKind::ProductsPurchased,
    ];

    /// Resolve a report type string. Never fails: unknown strings map to
    /// [`ReportKind::Unsupported`].
    ///
    /// Accepts the exact report title or its kebab-case slug.
    pub fn parse(report_type: &str) -> Self {
        Self::ALL
            .iter()
            .find(|kind| kind.title() == report_type || kind.slug() == report_type)
            .cloned()
            .unwrap_or_else(|| ReportKind::Unsupported(report_type.to_string()))
    }

    pub fn title(&self) -> &str {
        match self {
            ReportKind::DurationOfRelationship => "Duration of Relationship",
            ReportKind::CustomerSatisfaction => "Customer Satisfaction / NPS",
            ReportKind::PremiumContribution => "Premium Contribution by Customer",
            ReportKind::CommunicationTouchpoints => "Communication & Touchpoints",
            ReportKind::CrossSellPotential => "Cross-Sell / Upsell Potential",
            ReportKind::ProductsPurchased => "Number of Products Purchased",
            ReportKind::Unsupported(name) => name.as_str(),
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::DurationOfRelationship => "duration-of-relationship",
            ReportKind::CustomerSatisfaction => "customer-satisfaction",
            ReportKind::PremiumContribution => "premium-contribution",
            ReportKind::CommunicationTouchpoints => "communication-touchpoints",
            ReportKind::CrossSellPotential => "cross-sell-potential",
            ReportKind::ProductsPurchased => "products-purchased",
            ReportKind::Unsupported(_) => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ReportKind::Unsupported(_))
    }

    fn position(&self) -> Option<usize> {
        Self::ALL.iter().position(|kind| kind == self)
    }

    /// Next supported kind; the placeholder moves to the first report
    pub fn next(&self) -> Self {
        match self.position() {
            Some(index) => Self::ALL[(index + 1) % Self::ALL.len()].clone(),
            None => Self::ALL[0].clone(),
        }
    }

    /// Previous supported kind; the placeholder moves to the last report
    pub fn previous(&self) -> Self {
        match self.position() {
            Some(0) | None => Self::ALL[Self::ALL.len() - 1].clone(),
            Some(index) => Self::ALL[index - 1].clone(),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_titles() {
        for kind in ReportKind::ALL.iter() {
            assert_eq!(&ReportKind::parse(kind.title()), kind);
            assert_eq!(&ReportKind::parse(kind.slug()), kind);
        }
    }

    #[test]
    fn test_unknown_falls_back() {
        let kind = ReportKind::parse("Nonexistent Report");
        assert_eq!(kind, ReportKind::Unsupported("Nonexistent Report".to_string()));
        assert!(!kind.is_supported());
        assert_eq!(kind.title(), "Nonexistent Report");
    }

    #[test]
    fn test_match_is_exact() {
        // No case folding or partial matching on titles
        assert!(!ReportKind::parse("duration of relationship").is_supported());
        assert!(!ReportKind::parse("Duration").is_supported());
        assert_eq!(
            ReportKind::parse(" Duration of Relationship "),
            ReportKind::Unsupported(" Duration of Relationship ".to_string())
        );
    }

    #[test]
    fn test_cycle() {
        let mut kind = ReportKind::DurationOfRelationship;
        for _ in 0..ReportKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, ReportKind::DurationOfRelationship);

        assert_eq!(
            ReportKind::DurationOfRelationship.previous(),
            ReportKind::ProductsPurchased
        );
        assert_eq!(
            ReportKind::Unsupported("x".into()).next(),
            ReportKind::DurationOfRelationship
        );
    }
}

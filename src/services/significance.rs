use std::collections::HashMap;

use crate::models::Significance;

/// Inclusive lower bounds (in percent) for the medium, high and critical
/// labels. Anything below `medium` is low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoints {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Breakpoints {
    pub const fn new(medium: f64, high: f64, critical: f64) -> Self {
        Self { medium, high, critical }
    }

    pub fn classify(&self, abs_percent_change: f64) -> Significance {
        if abs_percent_change >= self.critical {
            Significance::Critical
        } else if abs_percent_change >= self.high {
            Significance::High
        } else if abs_percent_change >= self.medium {
            Significance::Medium
        } else {
            Significance::Low
        }
    }
}

/// Employment-like schedule used for any category without its own entry.
pub const DEFAULT_BREAKPOINTS: Breakpoints = Breakpoints::new(1.0, 3.0, 5.0);

/// Category -> breakpoints lookup. Categories are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct SignificanceTable {
    default: Breakpoints,
    by_category: HashMap<String, Breakpoints>,
}

impl Default for SignificanceTable {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINTS)
            .with_category("employment", DEFAULT_BREAKPOINTS)
            .with_category("market_indices", Breakpoints::new(3.0, 7.0, 12.0))
            .with_category("inflation", Breakpoints::new(0.5, 1.0, 3.0))
    }
}

impl SignificanceTable {
    pub fn new(default: Breakpoints) -> Self {
        Self {
            default,
            by_category: HashMap::new(),
        }
    }

    pub fn with_category(mut self, category: &str, breakpoints: Breakpoints) -> Self {
        self.by_category.insert(category.to_ascii_lowercase(), breakpoints);
        self
    }

    pub fn breakpoints_for(&self, category: &str) -> Breakpoints {
        self.by_category
            .get(&category.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.default)
    }

    /// Label an absolute percent change for an indicator category.
    ///
    /// `source` does not currently change the schedule. An infinite change
    /// (previous value zero) is always critical; NaN is treated as no move.
    pub fn assess_significance(
        &self,
        abs_percent_change: f64,
        category: &str,
        _source: &str,
    ) -> Significance {
        if abs_percent_change.is_infinite() {
            return Significance::Critical;
        }
        if abs_percent_change.is_nan() {
            return Significance::Low;
        }
        self.breakpoints_for(category).classify(abs_percent_change.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_schedule() {
        let table = SignificanceTable::default();
        assert_eq!(table.assess_significance(0.3, "employment", "BLS"), Significance::Low);
        assert_eq!(table.assess_significance(1.0, "employment", "BLS"), Significance::Medium);
        assert_eq!(table.assess_significance(3.0, "employment", "BLS"), Significance::High);
        assert_eq!(table.assess_significance(6.0, "employment", "BLS"), Significance::Critical);
    }

    #[test]
    fn test_market_indices_schedule() {
        let table = SignificanceTable::default();
        assert_eq!(table.assess_significance(1.0, "market_indices", "FRED"), Significance::Low);
        assert_eq!(table.assess_significance(3.0, "market_indices", "FRED"), Significance::Medium);
        assert_eq!(table.assess_significance(7.0, "market_indices", "FRED"), Significance::High);
        assert_eq!(table.assess_significance(12.0, "market_indices", "FRED"), Significance::Critical);
    }

    #[test]
    fn test_inflation_schedule() {
        let table = SignificanceTable::default();
        assert_eq!(table.assess_significance(0.4, "inflation", "BLS"), Significance::Low);
        assert_eq!(table.assess_significance(0.5, "inflation", "BLS"), Significance::Medium);
        assert_eq!(table.assess_significance(1.0, "inflation", "BLS"), Significance::High);
        assert_eq!(table.assess_significance(3.0, "inflation", "BLS"), Significance::Critical);
    }

    #[test]
    fn test_unknown_category_uses_default_schedule() {
        let table = SignificanceTable::default();
        assert_eq!(table.assess_significance(2.0, "housing", "Census"), Significance::Medium);
        assert_eq!(table.assess_significance(5.0, "", ""), Significance::Critical);
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let table = SignificanceTable::default();
        assert_eq!(table.assess_significance(4.0, "Market_Indices", "FRED"), Significance::Medium);
    }

    #[test]
    fn test_infinite_change_is_critical() {
        let table = SignificanceTable::default();
        assert_eq!(
            table.assess_significance(f64::INFINITY, "market_indices", "FRED"),
            Significance::Critical
        );
    }

    #[test]
    fn test_custom_category_without_touching_control_flow() {
        let table = SignificanceTable::default().with_category("housing", Breakpoints::new(2.0, 4.0, 8.0));
        assert_eq!(table.assess_significance(3.0, "housing", "Census"), Significance::Medium);
        assert_eq!(table.assess_significance(9.0, "housing", "Census"), Significance::Critical);
    }
}

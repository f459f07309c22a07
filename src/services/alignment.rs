use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::DataPoint;

/// Two equal-length value vectors paired by identical observation dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedSeries {
    pub dates: Vec<NaiveDate>,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Keep only the first `window` pairs (the most recent ones when the inputs
    /// are ordered most-recent-first).
    pub fn truncate(&mut self, window: usize) {
        self.dates.truncate(window);
        self.a.truncate(window);
        self.b.truncate(window);
    }
}

/// Inner join of two series on exact date equality.
///
/// Output follows the order of `a`. No tolerance or normalization is applied:
/// 2024-01-01 and 2024-01-02 never match. When `b` repeats a date, its first
/// occurrence is used.
pub fn align_series(a: &[DataPoint], b: &[DataPoint]) -> AlignedSeries {
    let mut by_date: HashMap<NaiveDate, f64> = HashMap::with_capacity(b.len());
    for point in b {
        by_date.entry(point.date).or_insert(point.value);
    }

    let mut aligned = AlignedSeries::default();
    for point in a {
        if let Some(&other) = by_date.get(&point.date) {
            aligned.dates.push(point.date);
            aligned.a.push(point.value);
            aligned.b.push(other);
        }
    }
    aligned
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn point(date: &str, value: f64) -> DataPoint {
        DataPoint::new(NaiveDate::from_str(date).unwrap(), value)
    }

    #[test]
    fn test_align_matches_only_identical_dates() {
        let a = vec![point("2024-03-01", 3.0), point("2024-02-01", 2.0), point("2024-01-01", 1.0)];
        let b = vec![point("2024-03-01", 30.0), point("2024-02-02", 20.0), point("2024-01-01", 10.0)];

        let aligned = align_series(&a, &b);
        assert_eq!(aligned.a, vec![3.0, 1.0]);
        assert_eq!(aligned.b, vec![30.0, 10.0]);
        assert_eq!(aligned.len(), 2);
    }

    #[test]
    fn test_align_no_overlap_is_empty() {
        let a = vec![point("2024-01-01", 1.0), point("2024-02-01", 2.0)];
        let b = vec![point("2023-01-01", 1.0), point("2023-02-01", 2.0)];

        let aligned = align_series(&a, &b);
        assert!(aligned.is_empty());
        assert!(aligned.b.is_empty());
    }

    #[test]
    fn test_align_duplicate_dates_use_first_occurrence() {
        let a = vec![point("2024-01-01", 1.0)];
        let b = vec![point("2024-01-01", 5.0), point("2024-01-01", 9.0)];

        let aligned = align_series(&a, &b);
        assert_eq!(aligned.b, vec![5.0]);
    }

    #[test]
    fn test_truncate_keeps_leading_pairs() {
        let a = vec![point("2024-03-01", 3.0), point("2024-02-01", 2.0), point("2024-01-01", 1.0)];
        let mut aligned = align_series(&a, &a);
        aligned.truncate(2);
        assert_eq!(aligned.a, vec![3.0, 2.0]);
        assert_eq!(aligned.dates.len(), 2);
    }
}

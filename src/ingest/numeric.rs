use serde::Serialize;

const THOUSANDS_SEPARATORS: [char; 2] = [',', '，'];

/// Parses a salary cell, treating anything that is not a finite number as missing.
pub fn coerce(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !THOUSANDS_SEPARATORS.contains(c))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Data-quality counters for one coerced column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CoercionStats {
    pub parsed: usize,
    pub blank: usize,
    /// Non-blank cells that could not be read as a number.
    pub failed: usize,
}

impl CoercionStats {
    pub fn coerce(&mut self, raw: &str) -> Option<f64> {
        let value = coerce(raw);
        match value {
            Some(_) => self.parsed += 1,
            None if raw.trim().is_empty() => self.blank += 1,
            None => self.failed += 1,
        }
        value
    }

    pub fn missing(&self) -> usize {
        self.blank + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::thousands("1,234", Some(1234.0))]
    #[case::plain("856", Some(856.0))]
    #[case::decimal("1,020.5", Some(1020.5))]
    #[case::padded("  742 ", Some(742.0))]
    #[case::fullwidth_comma("1，500", Some(1500.0))]
    #[case::not_available("N/A", None)]
    #[case::dash("-", None)]
    #[case::blank("", None)]
    #[case::nan("nan", None)]
    #[case::infinite("inf", None)]
    fn test_coerce(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(coerce(raw), expected);
    }

    #[test]
    fn test_coerce_is_idempotent() {
        for raw in ["1,234", "0.5", "1e3", "-12", "987,654,321"] {
            let once = coerce(raw).unwrap();
            assert_eq!(coerce(&once.to_string()), Some(once));
        }
    }

    #[test]
    fn test_stats_counts() {
        let mut stats = CoercionStats::default();
        for raw in ["1,000", "", "N/A", "2", "  "] {
            stats.coerce(raw);
        }
        assert_eq!(
            stats,
            CoercionStats {
                parsed: 2,
                blank: 2,
                failed: 1
            }
        );
        assert_eq!(stats.missing(), 3);
    }
}

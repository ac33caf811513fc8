use anyhow::{bail, Result};
use std::fmt;

/// Score condition parsed from a threshold expression.
///
/// Formats: `<N`, `<=N`, `>N`, `>=N`, `N` (exact), `N-M` (inclusive range).
/// Negative bounds are allowed: `>=-5`, `-10--5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    LessThan(i64),
    LessEqual(i64),
    GreaterThan(i64),
    GreaterEqual(i64),
    Equal(i64),
    Between(i64, i64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Empty range expression");
        }
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if let Some((split, _)) = s.char_indices().skip(1).find(|(_, c)| *c == '-') {
            // Range format: "100-500" (first char may be a sign)
            let low: i64 = s[..split].trim().parse()?;
            let high: i64 = s[split + 1..].trim().parse()?;
            if low > high {
                bail!("Range lower bound {} exceeds upper bound {}", low, high);
            }
            Ok(RangeOp::Between(low, high))
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: i64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Equal(n) => write!(f, "{}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = RangeOp::parse("<100").unwrap();
        assert!(range.matches(50));
        assert!(!range.matches(100));
        assert!(!range.matches(150));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = RangeOp::parse("<=5").unwrap();
        assert!(range.matches(5));
        assert!(range.matches(-3));
        assert!(!range.matches(6));
    }

    #[test]
    fn test_parse_range_greater_than() {
        let range = RangeOp::parse(">80").unwrap();
        assert!(!range.matches(70));
        assert!(!range.matches(80));
        assert!(range.matches(95));
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = RangeOp::parse(">= 80").unwrap();
        assert!(!range.matches(79));
        assert!(range.matches(80));
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse("0").unwrap();
        assert!(range.matches(0));
        assert!(!range.matches(1));
    }

    #[test]
    fn test_parse_negative_equal() {
        let range = RangeOp::parse("-5").unwrap();
        assert_eq!(range, RangeOp::Equal(-5));
    }

    #[test]
    fn test_parse_range_between() {
        let range = RangeOp::parse("100-500").unwrap();
        assert!(!range.matches(50));
        assert!(range.matches(100));
        assert!(range.matches(500));
        assert!(!range.matches(501));
    }

    #[test]
    fn test_parse_range_between_negative() {
        let range = RangeOp::parse("-10--5").unwrap();
        assert_eq!(range, RangeOp::Between(-10, -5));
        assert!(range.matches(-7));
        assert!(!range.matches(-4));
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        assert!(RangeOp::parse("500-100").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RangeOp::parse("").is_err());
        assert!(RangeOp::parse(">abc").is_err());
        assert!(RangeOp::parse("high").is_err());
    }

    #[test]
    fn test_display_matches_parse_input() {
        for expr in [">80", ">=80", "<5", "<=5", "3", "1-4"] {
            assert_eq!(RangeOp::parse(expr).unwrap().to_string(), expr);
        }
    }
}

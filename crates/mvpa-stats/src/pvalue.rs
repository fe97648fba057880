//! Translation of CDF values into p-values.

use serde::{Deserialize, Serialize};

/// Which tail of a null distribution a p-value is reported from.
///
/// Parses case-insensitively from `"left"`, `"right"` or `"any"`; any other
/// string is rejected.
///
/// ```
/// use mvpa_stats::pvalue::Tail;
///
/// assert_eq!("right".parse::<Tail>().unwrap(), Tail::Right);
/// assert!("both".parse::<Tail>().is_err());
/// ```
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Tail {
    /// Probability of a value at most as large as the observed one.
    #[default]
    Left,
    /// Probability of a value at least as large as the observed one.
    Right,
    /// Whichever tail the observed value falls into, split at `cdf = 0.5`.
    Any,
}

/// Returns the p-value for a single CDF value.
///
/// ```
/// use mvpa_stats::pvalue::{Tail, p_value};
///
/// assert_eq!(p_value(0.2, Tail::Left), 0.2);
/// assert_eq!(p_value(0.2, Tail::Right), 0.8);
/// assert_eq!(p_value(0.2, Tail::Any), 0.2);
/// assert_eq!(p_value(0.9, Tail::Any), 1.0 - 0.9);
/// ```
#[must_use]
pub fn p_value(cdf: f64, tail: Tail) -> f64 {
    match tail {
        Tail::Left => cdf,
        Tail::Right => 1.0 - cdf,
        Tail::Any if cdf >= 0.5 => 1.0 - cdf,
        Tail::Any => cdf,
    }
}

/// Applies [`p_value`] to every CDF value.
#[must_use]
pub fn p_values(cdfs: &[f64], tail: Tail) -> Vec<f64> {
    cdfs.iter().map(|&cdf| p_value(cdf, tail)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_tail_splits_at_half() {
        assert_eq!(p_value(0.5, Tail::Any), 0.5);
        assert_eq!(p_value(0.499, Tail::Any), 0.499);
        assert!((p_value(0.75, Tail::Any) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_p_values_preserve_order() {
        let ps = p_values(&[0.0, 0.25, 1.0], Tail::Right);
        assert_eq!(ps, vec![1.0, 0.75, 0.0]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Left".parse::<Tail>().unwrap(), Tail::Left);
        assert_eq!("ANY".parse::<Tail>().unwrap(), Tail::Any);
    }

    #[test]
    fn test_unknown_tail_is_rejected() {
        assert!("".parse::<Tail>().is_err());
        assert!("two-sided".parse::<Tail>().is_err());
    }
}

use crate::{distribution::Cdf, error::FitError};

/// Non-parametric distribution whose CDF is the fraction of stored samples
/// at or below the query point.
///
/// # Examples
///
/// ```
/// use mvpa_stats::{distribution::Cdf as _, empirical::EmpiricalDistribution};
///
/// let dist = EmpiricalDistribution::new(&[3.0, 1.0, 2.0, 2.0]).unwrap();
/// assert_eq!(dist.cdf(0.0), 0.0);
/// assert_eq!(dist.cdf(2.0), 0.75);
/// assert_eq!(dist.cdf(10.0), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalDistribution {
    sorted_samples: Vec<f64>,
}

impl EmpiricalDistribution {
    const NAME: &'static str = "empirical";

    /// Stores a copy of `samples`. Rejects empty or NaN-containing input.
    pub fn new(samples: &[f64]) -> Result<Self, FitError> {
        if samples.is_empty() {
            return Err(FitError::TooFewSamples {
                family: Self::NAME,
                required: 1,
                actual: 0,
            });
        }
        if samples.iter().any(|v| v.is_nan()) {
            return Err(FitError::NonFiniteSample { family: Self::NAME });
        }
        let mut sorted_samples = samples.to_vec();
        sorted_samples.sort_by(f64::total_cmp);
        Ok(Self { sorted_samples })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted_samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted_samples.is_empty()
    }

    /// Samples in ascending order.
    #[must_use]
    pub fn sorted_samples(&self) -> &[f64] {
        &self.sorted_samples
    }
}

impl Cdf for EmpiricalDistribution {
    #[expect(clippy::cast_precision_loss)]
    fn cdf(&self, x: f64) -> f64 {
        let at_or_below = self.sorted_samples.partition_point(|&v| v <= x);
        at_or_below as f64 / self.sorted_samples.len() as f64
    }
}

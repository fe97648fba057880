use crate::family::Family;

/// Errors raised while estimating the parameters of a distribution.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("{family} fit needs at least {required} samples, got {actual}")]
    TooFewSamples {
        family: &'static str,
        required: usize,
        actual: usize,
    },
    #[display("{family} fit got a non-finite sample")]
    NonFiniteSample { family: &'static str },
    #[display("{family} distribution does not support sample value {value}")]
    OutOfSupport { family: &'static str, value: f64 },
    #[display("{family} fit got samples without spread")]
    Degenerate { family: &'static str },
    #[display("{family} parameter estimation did not converge")]
    NoConvergence { family: &'static str },
    #[display("{family} distribution rejected estimated parameters {parameters:?}")]
    InvalidParameters {
        family: &'static str,
        parameters: Vec<f64>,
    },
}

impl FitError {
    pub(crate) fn invalid(family: Family, parameters: &[f64]) -> Self {
        Self::InvalidParameters {
            family: family.name(),
            parameters: parameters.to_vec(),
        }
    }
}

/// Errors raised by tests and queries over fitted distributions.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("no samples given")]
    EmptySamples,
    #[display("sample #{index} is not finite ({value})")]
    NonFiniteData { index: usize, value: f64 },
    #[display("failed to build reference distribution: {_0}")]
    Fit(FitError),
    #[display(
        "provided data has no elements in the non-parametric distribution under p <= {p_threshold}; \
         increase the size of the data or the value of p"
    )]
    NoPositives { p_threshold: f64 },
}

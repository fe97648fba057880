//! Statistical building blocks for MVPA significance testing.
//!
//! This crate provides the distribution machinery used to turn permutation
//! results into p-values:
//!
//! - **Descriptive statistics** and **percentiles** for summarizing samples
//! - **CDF abstractions**: [`distribution::Cdf`] and [`distribution::DistributionFitter`]
//! - **Non-parametric distributions** built from stored samples
//! - **Parametric families** with parameter estimation
//! - **Kolmogorov–Smirnov** goodness-of-fit testing
//! - **p-values** from left, right or either tail of a CDF
//! - **Distribution matching**: ranking candidate families by goodness of fit
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`distribution`]: CDF and fitter traits, fitter selection
//! - [`empirical`]: Empirical (non-parametric) distribution
//! - [`family`]: Parametric families and their estimators
//! - [`ks`]: One-sample Kolmogorov–Smirnov test
//! - [`pvalue`]: Tail selection and CDF-to-p-value translation
//! - [`matching`]: Best-matching distribution search
//!
//! # Examples
//!
//! ## Querying an empirical distribution
//!
//! ```
//! use mvpa_stats::{
//!     distribution::Cdf as _,
//!     empirical::EmpiricalDistribution,
//!     pvalue::{Tail, p_value},
//! };
//!
//! let null_samples = [0.45, 0.5, 0.55, 0.5, 0.48, 0.52, 0.6, 0.4, 0.5, 0.47];
//! let dist = EmpiricalDistribution::new(&null_samples).unwrap();
//! // An error of 0.2 is lower than everything seen under the null hypothesis.
//! assert_eq!(p_value(dist.cdf(0.2), Tail::Left), 0.0);
//! ```
//!
//! ## Fitting a parametric family
//!
//! ```
//! use mvpa_stats::family::Family;
//!
//! let fitted = Family::Normal.fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(fitted.parameters()[0], ("loc", 3.0));
//! assert!((fitted.cdf(3.0) - 0.5).abs() < 1e-12);
//! ```

pub mod descriptive;
pub mod distribution;
pub mod empirical;
pub mod error;
pub mod family;
pub mod ks;
pub mod matching;
pub mod percentiles;
pub mod pvalue;

pub use self::error::{FitError, StatsError};

//! Permutation-based null-hypothesis distributions for MVPA measures.
//!
//! Given a dataset and a measure computed on it, this crate estimates how the
//! measure is distributed when labels carry no information, and reports how
//! likely the observed value is under that distribution.
//!
//! # Modules
//!
//! - [`dataset`]: Samples with labels and chunks, label permutation
//! - [`measure`]: Dataset and transfer measures (ANOVA, nearest-mean error)
//! - [`seed`]: Reproducible permutation seeds
//! - [`null_dist`]: Monte-Carlo and fixed null distributions
//! - [`config`]: Serializable null distribution settings
//! - [`error`]: Error types
//!
//! # Example
//!
//! ```
//! use mvpa_nulldist::{
//!     config::NullDistConfig,
//!     dataset::Dataset,
//!     measure::{NearestMean, TransferError, TransferMeasure as _},
//!     null_dist::NullDist as _,
//! };
//!
//! let samples = vec![vec![0.0], vec![0.2], vec![0.1], vec![2.0], vec![2.2], vec![2.1]];
//! let training = Dataset::new(samples.clone(), vec![0, 0, 0, 1, 1, 1], None).unwrap();
//! let validation = Dataset::new(samples, vec![0, 0, 0, 1, 1, 1], None).unwrap();
//!
//! let measure = TransferError::new(NearestMean);
//! let mut null_dist = NullDistConfig::default().build().unwrap();
//! null_dist.fit_transfer(&measure, &training, &validation).unwrap();
//!
//! let error = measure.transfer(&training, &validation).unwrap();
//! assert_eq!(error, 0.0);
//! let p = null_dist.p_scalar(error).unwrap();
//! assert!((0.0..=1.0).contains(&p));
//! ```

pub use self::error::{DatasetError, MeasureError, NullDistError};

pub mod config;
pub mod dataset;
pub mod error;
pub mod measure;
pub mod null_dist;
pub mod seed;

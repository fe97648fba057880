//! Null-hypothesis distributions and significance of observed measurements.
//!
//! # Monte-Carlo permutation estimate
//!
//! [`MonteCarloNullDist`] estimates the distribution of a measure under the
//! "no effect" hypothesis by breaking the association between samples and
//! labels:
//!
//! 1. **Permute** - the labels of the training dataset are shuffled (globally
//!    or within each chunk); a validation dataset, if any, is left intact
//! 2. **Measure** - the measure is computed on the permuted data. For a
//!    transfer measure this is the error when predicting the *correct* labels
//!    of the validation dataset
//! 3. **Repeat** - for the configured number of permutations
//! 4. **Fit** - one distribution is fit per measured element (a scalar
//!    measure has one element, a featurewise measure one per feature)
//!
//! The fitted distributions are then queried through [`NullDist::cdf`] and
//! [`NullDist::p`].
//!
//! Permuting samples within a class changes nothing for most measures, so
//! many permutations are redundant. The estimate is not adaptive: the number
//! of permutations is fixed up front, and the resulting distribution may be
//! far from any conventional family (often multimodal), which is why the
//! non-parametric fitter is the default.
//!
//! # Example
//!
//! ```
//! use mvpa_nulldist::{
//!     dataset::Dataset,
//!     measure::{DatasetMeasure as _, OneWayAnova},
//!     null_dist::{MonteCarloNullDist, NullDist as _},
//!     seed::PermutationSeed,
//! };
//! use mvpa_stats::{distribution::Empirical, pvalue::Tail};
//!
//! let labels = (0..20_u32).map(|i| u32::from(i >= 10)).collect::<Vec<_>>();
//! let samples = (0..20_u32)
//!     .map(|i| vec![f64::from(labels[i as usize]) + f64::from(i % 3) * 0.1])
//!     .collect();
//! let dataset = Dataset::new(samples, labels, None).unwrap();
//!
//! let mut null_dist = MonteCarloNullDist::new(Box::new(Empirical), 200)
//!     .with_tail(Tail::Right)
//!     .with_seed(PermutationSeed::from_bytes([1; 16]));
//! null_dist.fit_measure(&OneWayAnova, &dataset).unwrap();
//!
//! let observed = OneWayAnova.measure(&dataset).unwrap();
//! let p = null_dist.p(observed.as_slice()).unwrap();
//! assert!(p[0] < 0.05);
//! ```

use std::fmt;

use mvpa_stats::{
    distribution::{BoxedCdf, BoxedFitter, Cdf as _, DistributionFitter},
    pvalue::{self, Tail},
};
use rand::Rng as _;
use tracing::{debug, info, trace};

use crate::{
    dataset::Dataset,
    error::{DatasetError, NullDistError},
    measure::{DatasetMeasure, Measurement, TransferMeasure},
    seed::PermutationSeed,
};

/// Distribution of a measure under the null hypothesis.
pub trait NullDist: fmt::Debug {
    /// Tail that [`NullDist::p`] reports.
    fn tail(&self) -> Tail;

    /// Fits the distribution for a measure computed on `dataset` alone.
    fn fit_measure(
        &mut self,
        measure: &dyn DatasetMeasure,
        dataset: &Dataset,
    ) -> Result<(), NullDistError>;

    /// Fits the distribution for a transfer measure trained on `training`
    /// and evaluated on `validation`.
    fn fit_transfer(
        &mut self,
        measure: &dyn TransferMeasure,
        training: &Dataset,
        validation: &Dataset,
    ) -> Result<(), NullDistError>;

    /// CDF values at `x`, one per element.
    fn cdf(&self, x: &[f64]) -> Result<Vec<f64>, NullDistError>;

    /// p-values of `x` from the configured tail.
    fn p(&self, x: &[f64]) -> Result<Vec<f64>, NullDistError> {
        Ok(pvalue::p_values(&self.cdf(x)?, self.tail()))
    }

    fn cdf_scalar(&self, x: f64) -> Result<f64, NullDistError> {
        Ok(self.cdf(&[x])?[0])
    }

    fn p_scalar(&self, x: f64) -> Result<f64, NullDistError> {
        Ok(self.p(&[x])?[0])
    }
}

/// Null distribution estimated from randomly permuted dataset labels.
#[derive(Debug)]
pub struct MonteCarloNullDist {
    fitter: BoxedFitter,
    permutations: usize,
    tail: Tail,
    per_chunk: bool,
    seed: Option<PermutationSeed>,
    dist_samples: Option<Vec<Vec<f64>>>,
    dists: Option<Vec<BoxedCdf>>,
}

impl MonteCarloNullDist {
    pub const DEFAULT_PERMUTATIONS: usize = 100;

    /// Creates an estimator fitting `fitter` to the values of `permutations`
    /// label permutations. Reports the left tail and permutes across chunks
    /// unless configured otherwise.
    #[must_use]
    pub fn new(fitter: BoxedFitter, permutations: usize) -> Self {
        Self {
            fitter,
            permutations,
            tail: Tail::default(),
            per_chunk: false,
            seed: None,
            dist_samples: None,
            dists: None,
        }
    }

    #[must_use]
    pub fn with_tail(self, tail: Tail) -> Self {
        Self { tail, ..self }
    }

    /// Restricts permutations to samples of the same chunk.
    #[must_use]
    pub fn with_per_chunk(self, per_chunk: bool) -> Self {
        Self { per_chunk, ..self }
    }

    /// Makes the permutations reproducible. Without a seed, every fit draws
    /// a fresh one.
    #[must_use]
    pub fn with_seed(self, seed: PermutationSeed) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    #[must_use]
    pub fn permutations(&self) -> usize {
        self.permutations
    }

    #[must_use]
    pub fn fitter(&self) -> &dyn DistributionFitter {
        &*self.fitter
    }

    /// Measured values of each permutation (rows) per element (columns),
    /// available after a successful fit.
    #[must_use]
    pub fn dist_samples(&self) -> Option<&[Vec<f64>]> {
        self.dist_samples.as_deref()
    }

    /// Number of fitted elements, or `None` before fitting.
    #[must_use]
    pub fn nelements(&self) -> Option<usize> {
        self.dists.as_ref().map(Vec::len)
    }

    /// Drops the fitted distributions.
    ///
    /// Non-parametric distributions keep every sample, so holding on to them
    /// can be expensive; queries fail with [`NullDistError::NotFitted`]
    /// afterwards.
    pub fn clean(&mut self) {
        self.dists = None;
    }

    fn fit_with<F>(&mut self, dataset: &Dataset, mut measure: F) -> Result<(), NullDistError>
    where
        F: FnMut(&Dataset) -> Result<Measurement, NullDistError>,
    {
        if self.permutations == 0 {
            return Err(NullDistError::InvalidConfig {
                reason: "at least one permutation is required".to_owned(),
            });
        }

        self.dist_samples = None;
        self.dists = None;

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = seed.rng();
        info!(
            permutations = self.permutations,
            per_chunk = self.per_chunk,
            %seed,
            "estimating null distribution"
        );

        let mut dist_samples: Vec<Vec<f64>> = Vec::with_capacity(self.permutations);
        for permutation in 0..self.permutations {
            let permuted = dataset.with_permuted_labels(&mut rng, self.per_chunk);
            let values = measure(&permuted)?.into_vec();
            trace!(permutation, ?values, "measured permutation");
            if let Some(expected) = dist_samples.first().map(Vec::len)
                && expected != values.len()
            {
                return Err(NullDistError::InconsistentMeasurement {
                    permutation,
                    expected,
                    actual: values.len(),
                });
            }
            dist_samples.push(values);
        }

        let nelements = dist_samples.first().map_or(0, Vec::len);
        if nelements == 0 {
            return Err(NullDistError::EmptyMeasurement);
        }

        let dists = (0..nelements)
            .map(|element| -> Result<BoxedCdf, NullDistError> {
                let column = dist_samples.iter().map(|row| row[element]).collect::<Vec<_>>();
                let dist = self.fitter.fit(&column)?;
                debug!(
                    element,
                    fitter = self.fitter.name(),
                    distribution = ?dist,
                    "estimated parameters"
                );
                Ok(dist)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.dist_samples = Some(dist_samples);
        self.dists = Some(dists);
        Ok(())
    }
}

impl NullDist for MonteCarloNullDist {
    fn tail(&self) -> Tail {
        self.tail
    }

    fn fit_measure(
        &mut self,
        measure: &dyn DatasetMeasure,
        dataset: &Dataset,
    ) -> Result<(), NullDistError> {
        self.fit_with(dataset, |permuted| Ok(measure.measure(permuted)?))
    }

    fn fit_transfer(
        &mut self,
        measure: &dyn TransferMeasure,
        training: &Dataset,
        validation: &Dataset,
    ) -> Result<(), NullDistError> {
        if validation.nfeatures() != training.nfeatures() {
            return Err(DatasetError::FeatureCountMismatch {
                dataset: "validation",
                expected: training.nfeatures(),
                actual: validation.nfeatures(),
            }
            .into());
        }
        self.fit_with(training, |permuted| {
            Ok(Measurement::Scalar(measure.transfer(permuted, validation)?))
        })
    }

    fn cdf(&self, x: &[f64]) -> Result<Vec<f64>, NullDistError> {
        let dists = self.dists.as_ref().ok_or(NullDistError::NotFitted)?;
        if dists.len() != x.len() {
            return Err(NullDistError::ElementCountMismatch {
                expected: dists.len(),
                actual: x.len(),
            });
        }
        Ok(dists.iter().zip(x).map(|(dist, &v)| dist.cdf(v)).collect())
    }
}

/// Null distribution given up front, e.g. a known parametric distribution.
///
/// Fitting does nothing; the CDF is applied to every queried value.
///
/// ```
/// use mvpa_nulldist::null_dist::{FixedNullDist, NullDist as _};
/// use mvpa_stats::{family::Family, pvalue::Tail};
///
/// let normal = Family::Normal.fit(&[-1.0, 1.0]).unwrap(); // N(0, 1)
/// let dist = FixedNullDist::new(Box::new(normal), Tail::Right);
/// let p = dist.p(&[0.0, 1.0]).unwrap();
/// assert!((p[0] - 0.5).abs() < 1e-12);
/// assert!((p[1] - 0.158_655).abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct FixedNullDist {
    dist: BoxedCdf,
    tail: Tail,
}

impl FixedNullDist {
    #[must_use]
    pub fn new(dist: BoxedCdf, tail: Tail) -> Self {
        Self { dist, tail }
    }
}

impl NullDist for FixedNullDist {
    fn tail(&self) -> Tail {
        self.tail
    }

    fn fit_measure(
        &mut self,
        _measure: &dyn DatasetMeasure,
        _dataset: &Dataset,
    ) -> Result<(), NullDistError> {
        Ok(())
    }

    fn fit_transfer(
        &mut self,
        _measure: &dyn TransferMeasure,
        _training: &Dataset,
        _validation: &Dataset,
    ) -> Result<(), NullDistError> {
        Ok(())
    }

    fn cdf(&self, x: &[f64]) -> Result<Vec<f64>, NullDistError> {
        Ok(x.iter().map(|&v| self.dist.cdf(v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        io,
        sync::{Arc, Mutex},
    };

    use mvpa_stats::{
        distribution::{Empirical, FitterKind},
        family::Family,
    };
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        error::MeasureError,
        measure::{NearestMean, OneWayAnova, TransferError},
    };

    const SEED: PermutationSeed = PermutationSeed::from_bytes([42; 16]);

    /// Two classes, `nfeatures` features; only feature 0 carries signal.
    fn two_class_dataset(nsamples_per_class: usize, nfeatures: usize, seed: u64) -> Dataset {
        let mut rng = Pcg32::seed_from_u64(seed);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let mut samples = vec![];
        let mut labels = vec![];
        let mut chunks = vec![];
        for label in 0..2_u32 {
            for i in 0..nsamples_per_class {
                let sample = (0..nfeatures)
                    .map(|feature| {
                        let signal = if feature == 0 { 3.0 * f64::from(label) } else { 0.0 };
                        signal + noise.sample(&mut rng)
                    })
                    .collect();
                samples.push(sample);
                labels.push(label);
                chunks.push(u32::try_from(i % 4).unwrap());
            }
        }
        Dataset::new(samples, labels, Some(chunks)).unwrap()
    }

    fn empirical(permutations: usize) -> MonteCarloNullDist {
        MonteCarloNullDist::new(Box::new(Empirical), permutations).with_seed(SEED)
    }

    #[test]
    fn test_query_before_fit_fails() {
        let dist = empirical(10);
        assert!(matches!(dist.cdf(&[0.0]), Err(NullDistError::NotFitted)));
        assert!(matches!(dist.p_scalar(0.0), Err(NullDistError::NotFitted)));
        assert_eq!(dist.nelements(), None);
        assert!(dist.dist_samples().is_none());
    }

    #[test]
    fn test_zero_permutations_is_invalid() {
        let dataset = two_class_dataset(5, 1, 0);
        let mut dist = empirical(0);
        assert!(matches!(
            dist.fit_measure(&OneWayAnova, &dataset),
            Err(NullDistError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_featurewise_fit_detects_informative_feature() {
        let dataset = two_class_dataset(20, 3, 1);
        let mut dist = empirical(200).with_tail(Tail::Right);
        dist.fit_measure(&OneWayAnova, &dataset).unwrap();

        assert_eq!(dist.nelements(), Some(3));
        let dist_samples = dist.dist_samples().unwrap();
        assert_eq!(dist_samples.len(), 200);
        assert!(dist_samples.iter().all(|row| row.len() == 3));

        let observed = OneWayAnova.measure(&dataset).unwrap();
        let p = dist.p(observed.as_slice()).unwrap();
        assert!(p[0] < 0.01, "informative feature p = {}", p[0]);
        assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_element_count_mismatch() {
        let dataset = two_class_dataset(10, 2, 2);
        let mut dist = empirical(20);
        dist.fit_measure(&OneWayAnova, &dataset).unwrap();
        assert!(matches!(
            dist.cdf(&[1.0]),
            Err(NullDistError::ElementCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        // scalar queries need a single-element distribution
        assert!(dist.cdf_scalar(1.0).is_err());
    }

    /// Nearest-mean transfer error that records the validation labels it saw.
    struct ValidationRecorder<'a> {
        inner: TransferError<NearestMean>,
        validation: &'a Dataset,
        calls: Cell<usize>,
        permuted_training: Cell<usize>,
        training: &'a Dataset,
    }

    impl TransferMeasure for ValidationRecorder<'_> {
        fn transfer(&self, training: &Dataset, testing: &Dataset) -> Result<f64, MeasureError> {
            assert_eq!(testing, self.validation);
            self.calls.set(self.calls.get() + 1);
            if training.labels() != self.training.labels() {
                self.permuted_training.set(self.permuted_training.get() + 1);
            }
            self.inner.transfer(training, testing)
        }
    }

    #[test]
    fn test_transfer_error_on_permuted_training_labels() {
        let training = two_class_dataset(15, 2, 3);
        let validation = two_class_dataset(15, 2, 4);
        let measure = ValidationRecorder {
            inner: TransferError::new(NearestMean),
            validation: &validation,
            calls: Cell::new(0),
            permuted_training: Cell::new(0),
            training: &training,
        };
        let mut dist = empirical(100);
        dist.fit_transfer(&measure, &training, &validation).unwrap();

        assert_eq!(dist.nelements(), Some(1));
        assert_eq!(measure.calls.get(), 100);
        assert!(measure.permuted_training.get() > 90);

        // Permuted class means may still align with the informative feature,
        // so the null of the error is bimodal with mass near 0 and near 1.
        let observed = measure.inner.transfer(&training, &validation).unwrap();
        let mut null = dist
            .dist_samples()
            .unwrap()
            .iter()
            .map(|row| row[0])
            .collect::<Vec<_>>();
        null.sort_by(f64::total_cmp);
        assert!(observed < 0.3, "observed error {observed}");
        let median = null[null.len() / 2];
        assert!(observed <= median, "null median {median}");
        let p = dist.p_scalar(observed).unwrap();
        assert!(p < 0.5, "p = {p}");
    }

    #[test]
    fn test_transfer_rejects_validation_feature_mismatch() {
        let training = two_class_dataset(5, 2, 13);
        let validation = two_class_dataset(5, 3, 14);
        let mut dist = empirical(10);
        let err = dist
            .fit_transfer(&TransferError::new(NearestMean), &training, &validation)
            .unwrap_err();
        assert!(matches!(
            err,
            NullDistError::Dataset(DatasetError::FeatureCountMismatch {
                dataset: "validation",
                expected: 2,
                actual: 3
            })
        ));
        assert_eq!(dist.nelements(), None);
    }

    #[test]
    fn test_run_progress_is_logged_at_info() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let dataset = two_class_dataset(5, 1, 15);
        tracing::subscriber::with_default(subscriber, || {
            empirical(10).fit_measure(&OneWayAnova, &dataset).unwrap();
        });
        let logs = buffer.contents();
        assert!(logs.contains("estimating null distribution"), "{logs}");
        assert!(logs.contains("permutations=10"), "{logs}");
        // per-element parameters stay at debug level
        assert!(!logs.contains("estimated parameters"), "{logs}");
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_fit_does_not_modify_dataset() {
        let dataset = two_class_dataset(8, 1, 5);
        let copy = dataset.clone();
        let mut dist = empirical(30).with_per_chunk(true);
        dist.fit_measure(&OneWayAnova, &dataset).unwrap();
        assert_eq!(dataset, copy);
    }

    #[test]
    fn test_seeded_fits_are_reproducible() {
        let dataset = two_class_dataset(10, 2, 6);
        let mut a = empirical(50);
        let mut b = empirical(50);
        a.fit_measure(&OneWayAnova, &dataset).unwrap();
        b.fit_measure(&OneWayAnova, &dataset).unwrap();
        assert_eq!(a.dist_samples(), b.dist_samples());
    }

    #[test]
    fn test_inconsistent_measurement_shape() {
        let dataset = two_class_dataset(4, 1, 7);
        let calls = Cell::new(0_usize);
        let growing = |_: &Dataset| {
            calls.set(calls.get() + 1);
            Measurement::Featurewise(vec![0.0; calls.get()])
        };
        let mut dist = empirical(5);
        assert!(matches!(
            dist.fit_measure(&growing, &dataset),
            Err(NullDistError::InconsistentMeasurement {
                permutation: 1,
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_empty_measurement() {
        let dataset = two_class_dataset(4, 1, 8);
        let nothing = |_: &Dataset| Measurement::Featurewise(vec![]);
        let mut dist = empirical(5);
        assert!(matches!(
            dist.fit_measure(&nothing, &dataset),
            Err(NullDistError::EmptyMeasurement)
        ));
    }

    #[test]
    fn test_parametric_fit_errors_propagate() {
        let dataset = two_class_dataset(4, 1, 9);
        let constant = |_: &Dataset| Measurement::Scalar(0.5);
        let mut dist = MonteCarloNullDist::new(FitterKind::Parametric(Family::Normal).to_fitter(), 10)
            .with_seed(SEED);
        assert!(matches!(
            dist.fit_measure(&constant, &dataset),
            Err(NullDistError::Fit(_))
        ));
    }

    #[test]
    fn test_parametric_null_distribution() {
        let dataset = two_class_dataset(20, 1, 10);
        let mut dist = MonteCarloNullDist::new(FitterKind::Parametric(Family::Gamma).to_fitter(), 100)
            .with_seed(SEED)
            .with_tail(Tail::Right);
        dist.fit_measure(&OneWayAnova, &dataset).unwrap();
        let cdf = dist.cdf_scalar(0.0).unwrap();
        assert_eq!(cdf, 0.0);
    }

    #[test]
    fn test_clean_drops_distributions() {
        let dataset = two_class_dataset(5, 1, 11);
        let mut dist = empirical(10);
        dist.fit_measure(&OneWayAnova, &dataset).unwrap();
        assert!(dist.cdf_scalar(1.0).is_ok());
        dist.clean();
        assert!(matches!(dist.cdf_scalar(1.0), Err(NullDistError::NotFitted)));
        assert!(dist.dist_samples().is_some());
    }

    #[test]
    fn test_fixed_null_dist_ignores_fit() {
        let uniform = Family::Uniform.fit(&[0.0, 1.0]).unwrap();
        let mut dist = FixedNullDist::new(Box::new(uniform), Tail::Any);
        let dataset = two_class_dataset(3, 1, 12);
        dist.fit_measure(&OneWayAnova, &dataset).unwrap();
        assert_eq!(dist.cdf(&[0.25, 0.5, 2.0]).unwrap(), vec![0.25, 0.5, 1.0]);
        let p = dist.p(&[0.1, 0.9]).unwrap();
        assert!((p[0] - 0.1).abs() < 1e-12);
        assert!((p[1] - 0.1).abs() < 1e-12);
    }
}

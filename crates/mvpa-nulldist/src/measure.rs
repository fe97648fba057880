//! Measures whose null distribution is estimated by permutation.
//!
//! A [`DatasetMeasure`] maps a dataset to a scalar or to one value per
//! feature. A [`TransferMeasure`] trains on one dataset and reports its error
//! when predicting the correct labels of another.

use std::collections::BTreeMap;

use crate::{
    dataset::{Dataset, Label},
    error::MeasureError,
};

/// Output of a measure: a single value or one value per element.
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    Scalar(f64),
    Featurewise(Vec<f64>),
}

impl Measurement {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Measurement::Scalar(value) => std::slice::from_ref(value),
            Measurement::Featurewise(values) => values,
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Measurement::Scalar(value) => vec![value],
            Measurement::Featurewise(values) => values,
        }
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Measurement::Scalar(_))
    }
}

pub trait DatasetMeasure {
    fn measure(&self, dataset: &Dataset) -> Result<Measurement, MeasureError>;
}

impl<F> DatasetMeasure for F
where
    F: Fn(&Dataset) -> Measurement,
{
    fn measure(&self, dataset: &Dataset) -> Result<Measurement, MeasureError> {
        Ok(self(dataset))
    }
}

pub trait TransferMeasure {
    /// Error on `testing` of a model trained on `training`.
    fn transfer(&self, training: &Dataset, testing: &Dataset) -> Result<f64, MeasureError>;
}

/// Featurewise one-way ANOVA F-scores across label groups.
///
/// Features without within-group variance get `f64::INFINITY` if the group
/// means differ and `0.0` otherwise.
///
/// ```
/// use mvpa_nulldist::{dataset::Dataset, measure::{DatasetMeasure as _, OneWayAnova}};
///
/// let dataset = Dataset::new(
///     vec![vec![0.0, 1.0], vec![0.2, 3.0], vec![1.0, 2.0], vec![1.2, 2.0]],
///     vec![0, 0, 1, 1],
///     None,
/// )
/// .unwrap();
/// let scores = OneWayAnova.measure(&dataset).unwrap();
/// let scores = scores.as_slice();
/// assert!(scores[0] > 10.0);
/// assert_eq!(scores[1], 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OneWayAnova;

impl DatasetMeasure for OneWayAnova {
    #[expect(clippy::cast_precision_loss)]
    fn measure(&self, dataset: &Dataset) -> Result<Measurement, MeasureError> {
        let groups = group_indices(dataset.labels());
        let nsamples = dataset.nsamples();
        let ngroups = groups.len();
        if ngroups < 2 {
            return Err(MeasureError::TooFewClasses {
                required: 2,
                found: ngroups,
            });
        }
        if nsamples <= ngroups {
            return Err(MeasureError::TooFewSamples {
                samples: nsamples,
                classes: ngroups,
            });
        }
        let between_dof = (ngroups - 1) as f64;
        let within_dof = (nsamples - ngroups) as f64;

        let scores = (0..dataset.nfeatures())
            .map(|feature| {
                let values = dataset.samples().iter().map(|s| s[feature]);
                let grand_mean = values.sum::<f64>() / nsamples as f64;
                let (between, within) =
                    groups
                        .values()
                        .fold((0.0, 0.0), |(between, within), indices| {
                            let group = indices
                                .iter()
                                .map(|&i| dataset.samples()[i][feature])
                                .collect::<Vec<_>>();
                            let n = group.len() as f64;
                            let mean = group.iter().sum::<f64>() / n;
                            let spread = group.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
                            (between + n * (mean - grand_mean).powi(2), within + spread)
                        });
                if within > 0.0 {
                    (between / between_dof) / (within / within_dof)
                } else if between > 0.0 {
                    f64::INFINITY
                } else {
                    0.0
                }
            })
            .collect();
        Ok(Measurement::Featurewise(scores))
    }
}

/// A classifier trained on a dataset.
pub trait Classifier {
    type Trained: Predictor;

    fn train(&self, dataset: &Dataset) -> Result<Self::Trained, MeasureError>;
}

pub trait Predictor {
    fn nfeatures(&self) -> usize;

    fn predict(&self, sample: &[f64]) -> Label;
}

/// Assigns each sample the label of the closest class mean (Euclidean).
/// Ties go to the smallest label.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestMean;

#[derive(Debug, Clone)]
pub struct NearestMeanModel {
    means: Vec<(Label, Vec<f64>)>,
}

impl Classifier for NearestMean {
    type Trained = NearestMeanModel;

    #[expect(clippy::cast_precision_loss)]
    fn train(&self, dataset: &Dataset) -> Result<NearestMeanModel, MeasureError> {
        let groups = group_indices(dataset.labels());
        if groups.len() < 2 {
            return Err(MeasureError::TooFewClasses {
                required: 2,
                found: groups.len(),
            });
        }
        let means = groups
            .into_iter()
            .map(|(label, indices)| {
                let n = indices.len() as f64;
                let mut mean = vec![0.0; dataset.nfeatures()];
                for &i in &indices {
                    for (m, v) in mean.iter_mut().zip(&dataset.samples()[i]) {
                        *m += v / n;
                    }
                }
                (label, mean)
            })
            .collect();
        Ok(NearestMeanModel { means })
    }
}

impl Predictor for NearestMeanModel {
    fn nfeatures(&self) -> usize {
        self.means.first().map_or(0, |(_, mean)| mean.len())
    }

    fn predict(&self, sample: &[f64]) -> Label {
        let distance = |mean: &[f64]| {
            mean.iter()
                .zip(sample)
                .map(|(m, v)| (m - v).powi(2))
                .sum::<f64>()
        };
        self.means
            .iter()
            .map(|(label, mean)| (*label, distance(mean.as_slice())))
            .min_by(|(la, da), (lb, db)| da.total_cmp(db).then(la.cmp(lb)))
            .map_or(0, |(label, _)| label)
    }
}

/// Fraction of testing samples whose label a classifier trained on the
/// training samples gets wrong.
#[derive(Debug, Clone, Default)]
pub struct TransferError<C> {
    classifier: C,
}

impl<C> TransferError<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }
}

impl<C> TransferMeasure for TransferError<C>
where
    C: Classifier,
{
    #[expect(clippy::cast_precision_loss)]
    fn transfer(&self, training: &Dataset, testing: &Dataset) -> Result<f64, MeasureError> {
        let model = self.classifier.train(training)?;
        if model.nfeatures() != testing.nfeatures() {
            return Err(MeasureError::FeatureMismatch {
                expected: model.nfeatures(),
                actual: testing.nfeatures(),
            });
        }
        let errors = testing
            .samples()
            .iter()
            .zip(testing.labels())
            .filter(|(sample, label)| model.predict(sample) != **label)
            .count();
        Ok(errors as f64 / testing.nsamples() as f64)
    }
}

fn group_indices(labels: &[Label]) -> BTreeMap<Label, Vec<usize>> {
    let mut groups = BTreeMap::<Label, Vec<usize>>::new();
    for (index, &label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(index);
    }
    groups
}

use std::collections::BTreeMap;

use rand::{Rng, seq::SliceRandom as _};
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

pub type Label = u32;
pub type Chunk = u32;

/// Samples (rows) by features (columns) with a label and a chunk per sample.
///
/// Chunks group samples that are not independent of each other (e.g. volumes
/// from the same scanner run). Labels may be permuted within chunks so the
/// null distribution respects that structure.
///
/// # Examples
///
/// ```
/// use mvpa_nulldist::dataset::Dataset;
///
/// let dataset = Dataset::new(
///     vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.5, 0.5]],
///     vec![0, 1, 1],
///     None,
/// )
/// .unwrap();
/// assert_eq!(dataset.nsamples(), 3);
/// assert_eq!(dataset.nfeatures(), 2);
/// assert_eq!(dataset.unique_labels(), vec![0, 1]);
/// assert_eq!(dataset.chunks(), &[0, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetRecord")]
pub struct Dataset {
    samples: Vec<Vec<f64>>,
    labels: Vec<Label>,
    chunks: Vec<Chunk>,
}

#[derive(Debug, Deserialize)]
struct DatasetRecord {
    samples: Vec<Vec<f64>>,
    labels: Vec<Label>,
    #[serde(default)]
    chunks: Option<Vec<Chunk>>,
}

impl TryFrom<DatasetRecord> for Dataset {
    type Error = DatasetError;

    fn try_from(record: DatasetRecord) -> Result<Self, Self::Error> {
        Dataset::new(record.samples, record.labels, record.chunks)
    }
}

impl Dataset {
    /// Creates a dataset, putting every sample in chunk 0 when `chunks` is `None`.
    pub fn new(
        samples: Vec<Vec<f64>>,
        labels: Vec<Label>,
        chunks: Option<Vec<Chunk>>,
    ) -> Result<Self, DatasetError> {
        let nsamples = samples.len();
        if nsamples == 0 {
            return Err(DatasetError::Empty);
        }
        let nfeatures = samples[0].len();
        if nfeatures == 0 {
            return Err(DatasetError::NoFeatures);
        }
        if let Some((row, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, sample)| sample.len() != nfeatures)
        {
            return Err(DatasetError::RaggedSamples {
                row,
                expected: nfeatures,
                actual: sample.len(),
            });
        }
        if labels.len() != nsamples {
            return Err(DatasetError::AttributeLength {
                attribute: "labels",
                samples: nsamples,
                actual: labels.len(),
            });
        }
        let chunks = chunks.unwrap_or_else(|| vec![0; nsamples]);
        if chunks.len() != nsamples {
            return Err(DatasetError::AttributeLength {
                attribute: "chunks",
                samples: nsamples,
                actual: chunks.len(),
            });
        }
        Ok(Self {
            samples,
            labels,
            chunks,
        })
    }

    #[must_use]
    pub fn nsamples(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn nfeatures(&self) -> usize {
        self.samples[0].len()
    }

    #[must_use]
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Distinct labels in ascending order.
    #[must_use]
    pub fn unique_labels(&self) -> Vec<Label> {
        let mut labels = self.labels.clone();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Values of feature `index` across all samples.
    pub fn feature(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |sample| sample[index])
    }

    /// Returns a copy whose labels are randomly permuted.
    ///
    /// With `per_chunk`, labels are only exchanged between samples of the same
    /// chunk. Samples and chunks are left untouched.
    #[must_use]
    pub fn with_permuted_labels<R>(&self, rng: &mut R, per_chunk: bool) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut permuted = self.clone();
        if per_chunk {
            let mut members = BTreeMap::<Chunk, Vec<usize>>::new();
            for (index, &chunk) in self.chunks.iter().enumerate() {
                members.entry(chunk).or_default().push(index);
            }
            for indices in members.values() {
                let mut labels = indices.iter().map(|&i| self.labels[i]).collect::<Vec<_>>();
                labels.shuffle(rng);
                for (&i, label) in indices.iter().zip(labels) {
                    permuted.labels[i] = label;
                }
            }
        } else {
            permuted.labels.shuffle(rng);
        }
        permuted
    }
}

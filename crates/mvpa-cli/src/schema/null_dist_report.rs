use chrono::{DateTime, Utc};
use mvpa_nulldist::config::NullDistConfig;
use mvpa_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MeasureKind {
    /// Featurewise one-way ANOVA F-scores
    Anova,
    /// Transfer error of a nearest class mean classifier
    NearestMean,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NullDistReport {
    pub created_at: DateTime<Utc>,
    pub measure: MeasureKind,
    pub nsamples: usize,
    pub nfeatures: usize,
    pub config: NullDistConfig,
    pub elements: Vec<ElementReport>,
}

/// Significance of one measured element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementReport {
    pub index: usize,
    pub observed: f64,
    pub cdf: f64,
    pub p_value: f64,
    pub null: NullSummary,
}

/// Summary of the values measured on permuted data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

impl NullSummary {
    const PERCENTILE_POINTS: [f64; 3] = [5.0, 50.0, 95.0];

    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&sorted)?;
        let percentiles = Percentiles::from_sorted(&sorted, &Self::PERCENTILE_POINTS)?;
        Some(Self {
            mean: stats.mean,
            std_dev: stats.std_dev,
            p5: percentiles.get(5.0)?,
            p50: percentiles.get(50.0)?,
            p95: percentiles.get(95.0)?,
        })
    }
}

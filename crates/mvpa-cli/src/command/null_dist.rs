use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use mvpa_nulldist::{
    config::NullDistConfig,
    dataset::Dataset,
    measure::{DatasetMeasure as _, NearestMean, OneWayAnova, TransferError, TransferMeasure as _},
    null_dist::NullDist as _,
    seed::PermutationSeed,
};
use mvpa_stats::{distribution::FitterKind, pvalue::Tail};
use rand::Rng as _;
use tracing::warn;

use crate::{
    schema::null_dist_report::{ElementReport, MeasureKind, NullDistReport, NullSummary},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NullDistArg {
    /// Dataset JSON file (`samples`, `labels` and optional `chunks`)
    #[arg(long)]
    dataset: PathBuf,
    /// Validation dataset JSON file, required by transfer measures
    #[arg(long)]
    validation: Option<PathBuf>,
    /// Measure to compute
    #[arg(long, value_enum, default_value = "anova")]
    measure: MeasureKind,
    /// Number of label permutations
    #[arg(long, default_value_t = 100)]
    permutations: usize,
    /// Tail reported as p-value (left, right or any)
    #[arg(long, default_value = "left")]
    tail: Tail,
    /// Distribution fit to the permuted values ("empirical" or a family name)
    #[arg(long, default_value = "empirical")]
    distribution: FitterKind,
    /// Only permute labels within chunks
    #[arg(long)]
    per_chunk: bool,
    /// Permutation seed as 32 hex characters (random if omitted)
    #[arg(long)]
    seed: Option<PermutationSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &NullDistArg) -> anyhow::Result<()> {
    let NullDistArg {
        dataset,
        validation,
        measure,
        permutations,
        tail,
        distribution,
        per_chunk,
        seed,
        output,
    } = arg;

    let dataset: Dataset = util::read_json_file("dataset", dataset)?;
    let validation = validation
        .as_ref()
        .map(|path| util::read_json_file::<Dataset, _>("validation dataset", path))
        .transpose()?;

    // Record the seed so the report can be reproduced.
    let config = NullDistConfig {
        permutations: *permutations,
        tail: *tail,
        distribution: *distribution,
        per_chunk: *per_chunk,
        seed: Some(seed.unwrap_or_else(|| rand::rng().random())),
    };

    eprintln!(
        "Estimating {distribution} null distribution of {measure:?} from {permutations} permutations..."
    );
    if let Some(seed) = config.seed {
        eprintln!("  Seed: {seed}");
    }
    let report = build_report(&dataset, validation.as_ref(), *measure, config)?;

    eprintln!("Results ({tail:?} tail):");
    for element in &report.elements {
        eprintln!(
            "  {:4}: observed = {:.4}, p = {:.4} (null mean {:.4}, P95 {:.4})",
            element.index, element.observed, element.p_value, element.null.mean, element.null.p95
        );
    }

    Output::save_json(&report, output.as_deref())?;
    if let Some(path) = output {
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Fits the null distribution described by `config` and evaluates the
/// observed measure of `dataset` against it.
pub(crate) fn build_report(
    dataset: &Dataset,
    validation: Option<&Dataset>,
    measure: MeasureKind,
    config: NullDistConfig,
) -> anyhow::Result<NullDistReport> {
    let mut null_dist = config.build()?;
    let observed = match measure {
        MeasureKind::Anova => {
            if validation.is_some() {
                warn!("validation dataset is ignored by the anova measure");
            }
            null_dist
                .fit_measure(&OneWayAnova, dataset)
                .context("Failed to estimate null distribution")?;
            OneWayAnova.measure(dataset)?.into_vec()
        }
        MeasureKind::NearestMean => {
            let validation =
                validation.context("The nearest-mean measure requires --validation")?;
            let transfer_error = TransferError::new(NearestMean);
            null_dist
                .fit_transfer(&transfer_error, dataset, validation)
                .context("Failed to estimate null distribution")?;
            vec![transfer_error.transfer(dataset, validation)?]
        }
    };

    let cdf = null_dist.cdf(&observed)?;
    let p_values = null_dist.p(&observed)?;
    let dist_samples = null_dist
        .dist_samples()
        .context("Null distribution has no samples")?;

    let elements = observed
        .iter()
        .zip(&cdf)
        .zip(&p_values)
        .enumerate()
        .map(|(index, ((&observed, &cdf), &p_value))| {
            let column = dist_samples.iter().map(|row| row[index]).collect::<Vec<_>>();
            let null = NullSummary::from_values(&column)
                .with_context(|| format!("No null values for element #{index}"))?;
            Ok(ElementReport {
                index,
                observed,
                cdf,
                p_value,
                null,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(NullDistReport {
        created_at: Utc::now(),
        measure,
        nsamples: dataset.nsamples(),
        nfeatures: dataset.nfeatures(),
        config,
        elements,
    })
}

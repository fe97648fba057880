use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use mvpa_stats::{
    family::Family,
    matching::{self, DEFAULT_P_THRESHOLD, MatchOptions, MatchTest},
    pvalue::Tail,
};

use crate::{
    schema::match_report::{MatchEntry, MatchReport},
    util::{self, Output},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum TestKind {
    /// Kolmogorov-Smirnov goodness of fit
    Ks,
    /// Area between the ROC curves of significant values
    PRoc,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MatchDistArg {
    /// JSON file holding an array of numbers
    #[arg(long)]
    input: PathBuf,
    /// Goodness-of-fit criterion
    #[arg(long, value_enum, default_value = "ks")]
    test: TestKind,
    /// Tail that decides significance for p-ROC
    #[arg(long, default_value = "any")]
    tail: Tail,
    /// Candidates with a p-value at or below this threshold are rejected
    #[arg(long = "p", default_value_t = DEFAULT_P_THRESHOLD)]
    p_threshold: f64,
    /// Comma-separated candidate families (all if omitted)
    #[arg(long, value_delimiter = ',')]
    families: Vec<Family>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &MatchDistArg) -> anyhow::Result<()> {
    let MatchDistArg {
        input,
        test,
        tail,
        p_threshold,
        families,
        output,
    } = arg;

    let data: Vec<f64> = util::read_json_file("input", input)?;
    let options = match_options(*test, *tail, *p_threshold, families);

    eprintln!(
        "Matching {} samples against {} families...",
        data.len(),
        options.families.len()
    );
    let report = build_report(&data, &options)?;
    if report.matches.is_empty() {
        eprintln!("No distribution passed p > {p_threshold}");
    }
    for entry in &report.matches {
        eprintln!(
            "  {:2}: {:<12} D = {:.4}, p = {:.4}",
            entry.rank,
            entry.family.name(),
            entry.distance,
            entry.p_value
        );
    }
    Output::save_json(&report, output.as_deref())?;

    Ok(())
}

/// An empty `families` list selects every family.
fn match_options(test: TestKind, tail: Tail, p_threshold: f64, families: &[Family]) -> MatchOptions {
    let test = match test {
        TestKind::Ks => MatchTest::KsTest,
        TestKind::PRoc => MatchTest::PRoc { tail },
    };
    MatchOptions {
        test,
        p_threshold,
        families: if families.is_empty() {
            Family::ALL.to_vec()
        } else {
            families.to_vec()
        },
    }
}

pub(crate) fn build_report(data: &[f64], options: &MatchOptions) -> anyhow::Result<MatchReport> {
    let matches = matching::match_distribution(data, options)
        .context("Failed to match distributions")?;
    Ok(MatchReport {
        created_at: Utc::now(),
        nsamples: data.len(),
        test: options.test,
        p_threshold: options.p_threshold,
        matches: matches
            .iter()
            .enumerate()
            .map(|(rank, matched)| MatchEntry::new(rank + 1, matched))
            .collect(),
    })
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mvpa_stats::{family::Family, matching::{DistributionMatch, MatchTest}};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub created_at: DateTime<Utc>,
    pub nsamples: usize,
    pub test: MatchTest,
    pub p_threshold: f64,
    /// Accepted families, best first.
    pub matches: Vec<MatchEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub rank: usize,
    pub family: Family,
    pub distance: f64,
    pub p_value: f64,
    pub parameters: BTreeMap<String, f64>,
}

impl MatchEntry {
    pub fn new(rank: usize, matched: &DistributionMatch) -> Self {
        Self {
            rank,
            family: matched.family(),
            distance: matched.distance,
            p_value: matched.p_value,
            parameters: matched
                .fitted
                .parameters()
                .iter()
                .map(|&(name, value)| (name.to_owned(), value))
                .collect(),
        }
    }
}

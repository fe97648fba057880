use mvpa_stats::{distribution::FitterKind, pvalue::Tail};
use serde::{Deserialize, Serialize};

use crate::{error::NullDistError, null_dist::MonteCarloNullDist, seed::PermutationSeed};

/// Serializable settings of a [`MonteCarloNullDist`].
///
/// Every field is optional when deserializing:
///
/// ```
/// use mvpa_nulldist::config::NullDistConfig;
/// use mvpa_stats::pvalue::Tail;
///
/// let config: NullDistConfig = serde_json::from_str(r#"{"tail": "right"}"#).unwrap();
/// assert_eq!(config.permutations, 100);
/// assert_eq!(config.tail, Tail::Right);
///
/// let null_dist = config.build().unwrap();
/// assert_eq!(null_dist.permutations(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullDistConfig {
    pub permutations: usize,
    pub tail: Tail,
    pub distribution: FitterKind,
    pub per_chunk: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PermutationSeed>,
}

impl Default for NullDistConfig {
    fn default() -> Self {
        Self {
            permutations: MonteCarloNullDist::DEFAULT_PERMUTATIONS,
            tail: Tail::default(),
            distribution: FitterKind::default(),
            per_chunk: false,
            seed: None,
        }
    }
}

impl NullDistConfig {
    pub fn validate(&self) -> Result<(), NullDistError> {
        if self.permutations == 0 {
            return Err(NullDistError::InvalidConfig {
                reason: "at least one permutation is required".to_owned(),
            });
        }
        Ok(())
    }

    pub fn build(&self) -> Result<MonteCarloNullDist, NullDistError> {
        self.validate()?;
        let null_dist = MonteCarloNullDist::new(self.distribution.to_fitter(), self.permutations)
            .with_tail(self.tail)
            .with_per_chunk(self.per_chunk);
        Ok(match self.seed {
            Some(seed) => null_dist.with_seed(seed),
            None => null_dist,
        })
    }
}

#[cfg(test)]
mod tests {
    use mvpa_stats::family::Family;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = NullDistConfig::default();
        assert_eq!(config.permutations, 100);
        assert_eq!(config.tail, Tail::Left);
        assert_eq!(config.distribution, FitterKind::Empirical);
        assert!(!config.per_chunk);
        assert_eq!(config.seed, None);
        assert_eq!(serde_json::from_str::<NullDistConfig>("{}").unwrap(), config);
    }

    #[test]
    fn test_full_config_from_json() {
        let config: NullDistConfig = serde_json::from_str(
            r#"{
                "permutations": 500,
                "tail": "any",
                "distribution": "gamma",
                "per_chunk": true,
                "seed": "000102030405060708090a0b0c0d0e0f"
            }"#,
        )
        .unwrap();
        assert_eq!(config.permutations, 500);
        assert_eq!(config.tail, Tail::Any);
        assert_eq!(config.distribution, FitterKind::Parametric(Family::Gamma));
        assert!(config.per_chunk);
        assert_eq!(
            config.seed,
            Some(PermutationSeed::from_bytes([
                0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15
            ]))
        );

        let null_dist = config.build().unwrap();
        assert_eq!(null_dist.permutations(), 500);
        assert_eq!(null_dist.fitter().name(), "gamma");
    }

    #[test]
    fn test_zero_permutations_rejected() {
        let config = NullDistConfig {
            permutations: 0,
            ..NullDistConfig::default()
        };
        assert!(matches!(
            config.build(),
            Err(NullDistError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_unknown_tail_rejected() {
        assert!(serde_json::from_str::<NullDistConfig>(r#"{"tail": "both"}"#).is_err());
    }
}

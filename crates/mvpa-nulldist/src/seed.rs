use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for reproducible label permutations.
///
/// A 128-bit seed for the `Pcg32` generator that drives the permutations of a
/// Monte-Carlo null distribution. Reusing a seed reproduces the exact same
/// sequence of permuted datasets, and hence the same null distribution.
/// Seeds are written as 32-character hex strings.
///
/// # Example
///
/// ```
/// use mvpa_nulldist::seed::PermutationSeed;
/// use rand::Rng as _;
///
/// let seed: PermutationSeed = rand::rng().random();
/// let parsed: PermutationSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermutationSeed([u8; 16]);

impl PermutationSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates the generator the permutations are drawn from.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for PermutationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex: {reason}")]
pub struct ParseSeedError {
    reason: String,
}

impl FromStr for PermutationSeed {
    type Err = ParseSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 characters, got {}", hex_str.len()),
            });
        }
        // from_str_radix accepts a leading '+'
        if !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError {
                reason: format!("{hex_str} contains non-hex characters"),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParseSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PermutationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PermutationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<PermutationSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PermutationSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PermutationSeed(seed)
    }
}

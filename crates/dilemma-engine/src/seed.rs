use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a deterministic simulation run.
///
/// A 128-bit seed used to initialize the single random number generator a
/// run draws from. Genomes, tie keys and mutations are all drawn in sequence
/// from that generator, so the same seed reproduces the same run bit for bit.
///
/// The seed is written as a 32-character lowercase hex string, both by
/// [`fmt::Display`] and by its serde representation.
///
/// # Example
///
/// ```
/// use dilemma_engine::SimulationSeed;
/// use rand::{Rng as _, RngCore as _};
///
/// let seed: SimulationSeed = rand::rng().random();
/// let parsed: SimulationSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
///
/// // Same seed, same sequence.
/// assert_eq!(seed.rng().next_u64(), parsed.rng().next_u64());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimulationSeed([u8; 16]);

/// Error returned when parsing a [`SimulationSeed`] from a string.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hex characters")]
pub struct SeedParseError {
    input: String,
}

impl SimulationSeed {
    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a 64-bit number into a seed, for short command-line seeds.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates the random number generator for a run.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for SimulationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SimulationSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SeedParseError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SimulationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SimulationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<SimulationSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SimulationSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore as _;

    use super::*;

    #[test]
    fn test_known_value_all_zeros() {
        let seed = SimulationSeed::from_bytes([0; 16]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"00000000000000000000000000000000\"");

        let deserialized: SimulationSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_big_endian_ordering() {
        let mut bytes = [0; 16];
        bytes[0] = 0xab;
        bytes[15] = 0x01;
        let seed = SimulationSeed::from_bytes(bytes);
        assert_eq!(seed.to_string(), "ab000000000000000000000000000001");
    }

    #[test]
    fn test_from_u64() {
        let seed = SimulationSeed::from_u64(0x2a);
        assert_eq!(seed.to_string(), "0000000000000000000000000000002a");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!("abc".parse::<SimulationSeed>().is_err());
        assert!("0".repeat(33).parse::<SimulationSeed>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let input = "g".repeat(32);
        let err = input.parse::<SimulationSeed>().unwrap_err();
        assert!(err.to_string().contains(&input));
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<SimulationSeed>("\"xyz\"").is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: SimulationSeed = rand::rng().random();
        let mut a = seed.rng();
        let mut b = seed.rng();
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}

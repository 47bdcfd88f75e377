//! Binary-string lineage identifiers.
//!
//! Every network carries a [`Fingerprint`]: a short string over `{'0', '1'}`
//! that follows the network through breeding. Mutated offspring receive a
//! fingerprint that is guaranteed to differ from the parent's, crossover
//! offspring interleave both parents' bits. The trainer compares the best
//! candidate's fingerprint across generations to detect stagnation.
//!
//! # Example
//!
//! ```
//! use flapnet_network::fingerprint::Fingerprint;
//!
//! let mut rng = rand::rng();
//! let parent = Fingerprint::generate(10, &mut rng);
//! let child = parent.mutate(&mut rng);
//! assert_ne!(parent, child);
//! assert_eq!(child.len(), 10);
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the fingerprints assigned to freshly constructed networks.
pub const DEFAULT_LENGTH: usize = 10;

/// Per-bit flip probability used by [`Fingerprint::mutate`].
pub const BIT_FLIP_PROBABILITY: f64 = 0.05;

/// Number of probabilistic passes [`Fingerprint::mutate`] makes before it
/// forces a single bit flip.
pub const MAX_MUTATION_PASSES: usize = 1000;

/// Error returned when parsing a string that contains characters other than
/// `'0'` and `'1'`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid fingerprint character {found:?} at index {index}")]
pub struct FingerprintError {
    index: usize,
    found: char,
}

/// A lineage identifier made of `'0'` and `'1'` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(Vec<bool>);

impl Fingerprint {
    /// Generates a fingerprint with each bit drawn independently and uniformly.
    pub fn generate<R>(length: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self((0..length).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Returns the number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the fingerprint has no bits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with bits flipped at random, guaranteed to differ from `self`.
    ///
    /// Each pass flips every bit with probability [`BIT_FLIP_PROBABILITY`];
    /// flips accumulate across passes until the result differs from the
    /// original. After [`MAX_MUTATION_PASSES`] unsuccessful passes a single
    /// uniformly chosen bit is flipped instead.
    ///
    /// An empty fingerprint has nothing to flip and is returned unchanged.
    #[must_use]
    pub fn mutate<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return self.clone();
        }

        let mut mutated = self.0.clone();
        for _ in 0..MAX_MUTATION_PASSES {
            let mut changed = false;
            for bit in &mut mutated {
                if rng.random_bool(BIT_FLIP_PROBABILITY) {
                    *bit = !*bit;
                    changed = true;
                }
            }
            if changed && mutated != self.0 {
                return Self(mutated);
            }
        }

        let mut forced = self.0.clone();
        let index = rng.random_range(0..forced.len());
        forced[index] = !forced[index];
        Self(forced)
    }

    /// Interleaves two fingerprints: even positions from `self`, odd positions
    /// from `other`.
    ///
    /// Returns `None` when the lengths differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use flapnet_network::fingerprint::Fingerprint;
    ///
    /// let a: Fingerprint = "0000".parse().unwrap();
    /// let b: Fingerprint = "1111".parse().unwrap();
    /// assert_eq!(a.combine(&b).unwrap().to_string(), "0101");
    ///
    /// let short: Fingerprint = "11".parse().unwrap();
    /// assert!(a.combine(&short).is_none());
    /// ```
    #[must_use]
    pub fn combine(&self, other: &Self) -> Option<Self> {
        if self.len() != other.len() {
            return None;
        }
        let bits = self
            .0
            .iter()
            .zip(&other.0)
            .enumerate()
            .map(|(i, (a, b))| if i % 2 == 0 { *a } else { *b })
            .collect();
        Some(Self(bits))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(index, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(FingerprintError { index, found }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn fp(s: &str) -> Fingerprint {
        s.parse().unwrap()
    }

    #[test]
    fn test_generate_has_requested_length() {
        let mut rng = Pcg32::seed_from_u64(1);
        for len in [0, 1, 4, 10, 64] {
            assert_eq!(Fingerprint::generate(len, &mut rng).len(), len);
        }
    }

    #[test]
    fn test_generate_produces_both_bits() {
        let mut rng = Pcg32::seed_from_u64(2);
        let s = Fingerprint::generate(256, &mut rng).to_string();
        assert!(s.contains('0'));
        assert!(s.contains('1'));
    }

    #[test]
    fn test_mutate_always_differs() {
        let mut rng = Pcg32::seed_from_u64(3);
        for len in [1, 2, 4, 10, 32] {
            for _ in 0..200 {
                let parent = Fingerprint::generate(len, &mut rng);
                let child = parent.mutate(&mut rng);
                assert_ne!(parent, child);
                assert_eq!(parent.len(), child.len());
            }
        }
    }

    #[test]
    fn test_mutate_leaves_parent_untouched() {
        let mut rng = Pcg32::seed_from_u64(4);
        let parent = fp("0101010101");
        let _ = parent.mutate(&mut rng);
        assert_eq!(parent.to_string(), "0101010101");
    }

    #[test]
    fn test_mutate_flips_few_bits_on_average() {
        let mut rng = Pcg32::seed_from_u64(5);
        let parent = fp(&"0".repeat(100));
        let flipped = (0..100)
            .map(|_| {
                parent
                    .mutate(&mut rng)
                    .to_string()
                    .chars()
                    .filter(|c| *c == '1')
                    .count()
            })
            .sum::<usize>();
        // 5% of 100 bits per mutation, averaged over 100 mutations
        assert!((200..=900).contains(&flipped), "flipped = {flipped}");
    }

    #[test]
    fn test_mutate_empty_is_identity() {
        let mut rng = Pcg32::seed_from_u64(6);
        let empty = fp("");
        assert_eq!(empty.mutate(&mut rng), empty);
    }

    #[test]
    fn test_combine_interleaves() {
        assert_eq!(fp("1100").combine(&fp("0011")).unwrap(), fp("1001"));
        assert_eq!(fp("10101").combine(&fp("01010")).unwrap(), fp("11111"));
        assert_eq!(fp("").combine(&fp("")).unwrap(), fp(""));
    }

    #[test]
    fn test_combine_length_mismatch() {
        assert!(fp("0101").combine(&fp("010")).is_none());
        assert!(fp("").combine(&fp("1")).is_none());
    }

    #[test]
    fn test_parse_rejects_other_characters() {
        let err = "01x1".parse::<Fingerprint>().unwrap_err();
        assert_eq!(err, FingerprintError { index: 2, found: 'x' });
    }

    #[test]
    fn test_serde_uses_bit_string() {
        let json = serde_json::to_string(&fp("0110")).unwrap();
        assert_eq!(json, "\"0110\"");
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp("0110"));
        assert!(serde_json::from_str::<Fingerprint>("\"0120\"").is_err());
    }
}

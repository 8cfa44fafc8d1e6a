//! Content fingerprints for near-duplicate detection
//!
//! A fingerprint is a SimHash-style bit vector of configurable width. Pages
//! that share most of their tokens end up a small Hamming distance apart, so
//! similarity is checked by counting differing bits instead of comparing
//! content byte for byte.

mod simhash;

use serde::Deserialize;
use std::fmt;

pub use simhash::fingerprint_tokens;

/// Supported fingerprint widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub enum FingerprintWidth {
    W16,
    W32,
    W64,
}

impl FingerprintWidth {
    /// Number of bits in a fingerprint of this width
    pub fn bits(self) -> u32 {
        match self {
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Number of bytes a wide hash is folded down to
    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Mask selecting the low `bits()` bits of a `u64`
    pub fn mask(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            other => (1u64 << other.bits()) - 1,
        }
    }
}

impl TryFrom<u32> for FingerprintWidth {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(Self::W16),
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            other => Err(format!(
                "fingerprint width must be 16, 32 or 64 bits, got {}",
                other
            )),
        }
    }
}

impl fmt::Display for FingerprintWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// A fixed-width similarity fingerprint
///
/// Fingerprints are only ever compared by Hamming distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    value: u64,
    width: FingerprintWidth,
}

impl Fingerprint {
    /// Builds a fingerprint from raw bits, discarding bits beyond the width
    pub fn from_raw(value: u64, width: FingerprintWidth) -> Self {
        Self {
            value: value & width.mask(),
            width,
        }
    }

    /// Computes the fingerprint of a filtered token multiset
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], width: FingerprintWidth) -> Self {
        fingerprint_tokens(tokens, width)
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn width(&self) -> FingerprintWidth {
        self.width
    }

    /// Counts the bit positions where two fingerprints differ
    ///
    /// Both fingerprints must have the same width.
    pub fn hamming_distance(&self, other: &Fingerprint) -> u32 {
        debug_assert_eq!(self.width, other.width, "fingerprint widths differ");
        ((self.value ^ other.value) & self.width.mask()).count_ones()
    }

    /// Returns true if the two fingerprints are at most `threshold` bits apart
    pub fn is_within(&self, other: &Fingerprint, threshold: u32) -> bool {
        self.hamming_distance(other) <= threshold
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.width.bytes() * 2;
        write!(f, "{:0width$x}", self.value, width = digits)
    }
}

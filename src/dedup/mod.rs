//! Near-duplicate index over content fingerprints
//!
//! The index is append-only: fingerprints are never removed or changed once
//! inserted. A query asks whether any stored fingerprint lies within the
//! configured Hamming distance of the probe.
//!
//! Two implementations share the [`DedupIndex`] trait:
//! - [`LinearIndex`] scans every stored fingerprint
//! - [`BandedIndex`] looks up candidates by exact bit-band match first

mod banded;
mod linear;

pub use banded::BandedIndex;
pub use linear::LinearIndex;

use crate::config::{DedupConfig, IndexKind};
use crate::fingerprint::Fingerprint;
use std::fmt::Debug;

/// Trait for near-duplicate fingerprint stores
pub trait DedupIndex: Debug + Send {
    /// Returns a stored fingerprint within the threshold of `fp`, if any
    fn find_near_duplicate(&self, fp: &Fingerprint) -> Option<Fingerprint>;

    /// Returns true if a stored fingerprint is within the threshold of `fp`
    fn is_near_duplicate(&self, fp: &Fingerprint) -> bool {
        self.find_near_duplicate(fp).is_some()
    }

    /// Appends a fingerprint; never rejects
    fn insert(&mut self, fp: Fingerprint);

    /// Number of stored fingerprints
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum Hamming distance treated as a near-duplicate
    fn threshold(&self) -> u32;
}

/// Builds the index selected by the configuration
pub fn build_index(config: &DedupConfig) -> Box<dyn DedupIndex> {
    match config.index {
        IndexKind::Linear => Box::new(LinearIndex::new(config.hamming_threshold)),
        IndexKind::Banded => Box::new(BandedIndex::new(
            config.fingerprint_bits,
            config.hamming_threshold,
        )),
    }
}

use super::DedupIndex;
use crate::fingerprint::{Fingerprint, FingerprintWidth};
use std::collections::HashMap;

/// A contiguous range of fingerprint bits used as a lookup key
#[derive(Debug, Clone, Copy)]
struct Band {
    shift: u32,
    mask: u64,
}

impl Band {
    fn key(&self, fp: &Fingerprint) -> u64 {
        (fp.value() >> self.shift) & self.mask
    }
}

/// Fingerprint index keyed on bit bands
///
/// The fingerprint is split into `threshold + 1` disjoint bands. Two
/// fingerprints within `threshold` bits of each other cannot differ in every
/// band, so they always share at least one band exactly. Lookups fetch the
/// fingerprints sharing a band with the probe and confirm each candidate with
/// a full Hamming distance check, which keeps the answers identical to a flat
/// scan.
///
/// A threshold at or above the fingerprint width makes every pair of
/// fingerprints near-duplicates; lookups then return the first stored one.
#[derive(Debug, Clone)]
pub struct BandedIndex {
    fingerprints: Vec<Fingerprint>,
    bands: Vec<Band>,
    // One table per band: band key -> positions in `fingerprints`
    tables: Vec<HashMap<u64, Vec<usize>>>,
    threshold: u32,
    bits: u32,
}

impl BandedIndex {
    pub fn new(width: FingerprintWidth, threshold: u32) -> Self {
        let bits = width.bits();
        let count = threshold.saturating_add(1).min(bits);

        let mut bands = Vec::with_capacity(count as usize);
        let mut shift = 0;
        for i in 0..count {
            // Spread the remainder over the first bands
            let len = bits / count + u32::from(i < bits % count);
            let mask = if len >= 64 { u64::MAX } else { (1u64 << len) - 1 };
            bands.push(Band { shift, mask });
            shift += len;
        }

        Self {
            fingerprints: Vec::new(),
            tables: vec![HashMap::new(); bands.len()],
            bands,
            threshold,
            bits,
        }
    }

    /// Number of bands the fingerprint is split into
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }
}

impl DedupIndex for BandedIndex {
    fn find_near_duplicate(&self, fp: &Fingerprint) -> Option<Fingerprint> {
        if self.threshold >= self.bits {
            return self.fingerprints.first().copied();
        }

        for (band, table) in self.bands.iter().zip(&self.tables) {
            let Some(positions) = table.get(&band.key(fp)) else {
                continue;
            };

            let found = positions
                .iter()
                .map(|&pos| self.fingerprints[pos])
                .find(|candidate| candidate.is_within(fp, self.threshold));
            if found.is_some() {
                return found;
            }
        }

        None
    }

    fn insert(&mut self, fp: Fingerprint) {
        let pos = self.fingerprints.len();
        self.fingerprints.push(fp);

        for (band, table) in self.bands.iter().zip(self.tables.iter_mut()) {
            table.entry(band.key(&fp)).or_default().push(pos);
        }
    }

    fn len(&self) -> usize {
        self.fingerprints.len()
    }

    fn threshold(&self) -> u32 {
        self.threshold
    }
}

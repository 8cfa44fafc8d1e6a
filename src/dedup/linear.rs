use super::DedupIndex;
use crate::fingerprint::Fingerprint;

/// Flat list of fingerprints, scanned on every query
///
/// Query cost grows linearly with the number of stored pages, which is fine
/// for crawls of a few thousand pages.
#[derive(Debug, Clone)]
pub struct LinearIndex {
    fingerprints: Vec<Fingerprint>,
    threshold: u32,
}

impl LinearIndex {
    pub fn new(threshold: u32) -> Self {
        Self {
            fingerprints: Vec::new(),
            threshold,
        }
    }
}

impl DedupIndex for LinearIndex {
    fn find_near_duplicate(&self, fp: &Fingerprint) -> Option<Fingerprint> {
        self.fingerprints
            .iter()
            .find(|stored| stored.is_within(fp, self.threshold))
            .copied()
    }

    fn insert(&mut self, fp: Fingerprint) {
        self.fingerprints.push(fp);
    }

    fn len(&self) -> usize {
        self.fingerprints.len()
    }

    fn threshold(&self) -> u32 {
        self.threshold
    }
}

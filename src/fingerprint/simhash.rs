use super::{Fingerprint, FingerprintWidth};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Computes a SimHash fingerprint from a token multiset
///
/// # Algorithm
///
/// 1. Count occurrences of each distinct token
/// 2. Hash each token with SHA-256 and fold the digest to the target width
///    by XOR-ing consecutive width-sized byte slices
/// 3. For every bit position, add the token's count to that bit's
///    accumulator if the folded hash has the bit set, otherwise subtract it
/// 4. Bit `i` of the fingerprint is set iff accumulator `i` is positive
///
/// Token order never affects the result.
pub fn fingerprint_tokens<S: AsRef<str>>(tokens: &[S], width: FingerprintWidth) -> Fingerprint {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }

    let mut accumulators = vec![0i64; width.bits() as usize];
    for (token, weight) in counts {
        let hash = folded_hash(token, width);
        for (bit, slot) in accumulators.iter_mut().enumerate() {
            if (hash >> bit) & 1 == 1 {
                *slot += weight;
            } else {
                *slot -= weight;
            }
        }
    }

    let value = accumulators
        .iter()
        .enumerate()
        .filter(|(_, &total)| total > 0)
        .fold(0u64, |fp, (bit, _)| fp | (1u64 << bit));

    Fingerprint::from_raw(value, width)
}

/// Hashes a token and XOR-folds the digest into `width.bytes()` bytes
fn folded_hash(token: &str, width: FingerprintWidth) -> u64 {
    let digest = Sha256::digest(token.as_bytes());
    let size = width.bytes();

    let mut folded = [0u8; 8];
    for chunk in digest.chunks(size) {
        for (slot, byte) in folded.iter_mut().zip(chunk) {
            *slot ^= byte;
        }
    }

    folded[..size]
        .iter()
        .fold(0u64, |value, &byte| (value << 8) | u64::from(byte))
}

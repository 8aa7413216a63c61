//! Unordered overlap test between phrase and message fingerprints.

use std::collections::HashSet;

/// Number of distinct template hashes that also occur in `source`.
pub fn shared_hash_count(template: &[u64], source: &[u64]) -> usize {
    let source: HashSet<u64> = source.iter().copied().collect();
    let template: HashSet<u64> = template.iter().copied().collect();
    template.intersection(&source).count()
}

/// Accept when strictly more than `template_len * match_percent` hashes are
/// shared. `template_len` counts fingerprints, duplicates included.
pub fn overlap_accepts(shared: usize, template_len: usize, match_percent: f64) -> bool {
    template_len > 0 && shared as f64 > template_len as f64 * match_percent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_counts_distinct_hashes() {
        assert_eq!(shared_hash_count(&[1, 2, 2, 3], &[2, 3, 3, 9]), 2);
        assert_eq!(shared_hash_count(&[], &[1]), 0);
        assert_eq!(shared_hash_count(&[1], &[]), 0);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(overlap_accepts(5, 5, 0.8));
        assert!(!overlap_accepts(4, 5, 0.8));
        assert!(overlap_accepts(1, 1, 0.99));
        assert!(!overlap_accepts(0, 0, 0.5));
    }
}

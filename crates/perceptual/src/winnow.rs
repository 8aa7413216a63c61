//! Winnowing: one local minimum per window of k-gram hashes.

use crate::fingerprint::Fingerprint;

/// Select the minimum hash of every `window_len`-wide window, left to right.
///
/// Ties go to the rightmost position. While the previous minimum is still
/// inside the window only the newly entered hash is compared; once it slides
/// out the window is rescanned.
///
/// A candidate is recorded only when its hash differs from the last recorded
/// hash *and* its position differs from the last recorded position. Matching
/// on either field drops the candidate.
///
/// Returns nothing when there are fewer hashes than `window_len`.
pub fn winnow(hashes: &[u64], window_len: usize) -> Vec<Fingerprint> {
    let n = hashes.len();
    if window_len == 0 || n < window_len {
        return Vec::new();
    }

    let window_count = n - window_len + 1;
    let mut out = Vec::with_capacity(window_count);
    let mut last: Option<Fingerprint> = None;
    let mut min_val = hashes[0];
    let mut min_pos = 0usize;

    for start in 0..window_count {
        let newest = start + window_len - 1;
        if start > 0 && min_pos >= start {
            if hashes[newest] <= min_val {
                min_val = hashes[newest];
                min_pos = newest;
            }
        } else {
            min_val = hashes[start];
            min_pos = start;
            for (offset, &val) in hashes[start + 1..=newest].iter().enumerate() {
                if val <= min_val {
                    min_val = val;
                    min_pos = start + 1 + offset;
                }
            }
        }

        let candidate = Fingerprint::new(min_val, min_pos);
        let fresh = match last {
            None => true,
            Some(prev) => prev.hash != candidate.hash && prev.position != candidate.position,
        };
        if fresh {
            out.push(candidate);
            last = Some(candidate);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(fps: &[Fingerprint]) -> Vec<(u64, usize)> {
        fps.iter().map(|fp| (fp.hash, fp.position)).collect()
    }

    #[test]
    fn hello_world_winnowed() {
        let hashes = [1269, 802, 1908, 1911, 2393, 3649, 2388, 2856, 1900];
        assert_eq!(
            pairs(&winnow(&hashes, 2)),
            vec![(802, 1), (1908, 2), (1911, 3), (2393, 4), (2388, 6), (1900, 8)]
        );
    }

    #[test]
    fn empty_and_short_inputs() {
        assert!(winnow(&[], 3).is_empty());
        assert!(winnow(&[5, 6], 3).is_empty());
        assert!(winnow(&[5, 6, 7], 0).is_empty());
    }

    #[test]
    fn window_equal_to_length_picks_global_minimum() {
        assert_eq!(pairs(&winnow(&[50, 100, 75], 3)), vec![(50, 0)]);
    }

    #[test]
    fn window_of_one_keeps_changes_only() {
        assert_eq!(
            pairs(&winnow(&[3, 3, 4, 3], 1)),
            vec![(3, 0), (4, 2), (3, 3)]
        );
    }

    #[test]
    fn ties_go_rightmost() {
        // windows: [9,4,4] -> (4,2); [4,4,8] -> newest 8 loses, (4,2) repeats
        assert_eq!(pairs(&winnow(&[9, 4, 4, 8], 3)), vec![(4, 2)]);
        // rescan on [4,7,4] keeps the later 4
        let fps = winnow(&[1, 4, 7, 4, 9], 3);
        assert_eq!(pairs(&fps), vec![(1, 0), (4, 3)]);
    }

    #[test]
    fn same_value_at_new_position_is_dropped() {
        // (5,1) then the minimum moves to (5,4): equal hash suppresses it
        let fps = winnow(&[9, 5, 8, 9, 5, 9], 3);
        assert_eq!(pairs(&fps), vec![(5, 1)]);
    }

    #[test]
    fn incremental_agrees_with_full_rescan() {
        let hashes: Vec<u64> = (0..64u64).map(|i| (i * 7919 + 13) % 37).collect();
        for w in 1..8 {
            let fast = winnow(&hashes, w);
            let mut naive = Vec::new();
            let mut last: Option<Fingerprint> = None;
            for start in 0..=hashes.len() - w {
                let mut best = Fingerprint::new(u64::MAX, 0);
                for (pos, &val) in hashes.iter().enumerate().skip(start).take(w) {
                    if val <= best.hash {
                        best = Fingerprint::new(val, pos);
                    }
                }
                let keep = last.is_none_or(|p| p.hash != best.hash && p.position != best.position);
                if keep {
                    naive.push(best);
                    last = Some(best);
                }
            }
            assert_eq!(fast, naive, "window {w}");
        }
    }
}

//! Entropy and information-gain computation for node splitting.
use rayon::prelude::*;
use fixedbitset::FixedBitSet;

use crate::Table;
use crate::constants::EXCLUDED_GAIN;

/// Class-distribution statistics of one side of a candidate split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SideStats {
    pub(crate) entropy: f64,
    pub(crate) n_reaching: usize,
    pub(crate) frac_zero: f64,
    pub(crate) pure_class: Option<u8>,
}

impl SideStats {
    /// Build the statistics of a side from its class counts.
    /// A side no row falls into borrows the root's global
    /// class-0 fraction instead of dividing by zero.
    pub(crate) fn from_counts(
        n_zero: usize,
        n_one: usize,
        root_frac_zero: f64,
    ) -> Self
    {
        let n_reaching = n_zero + n_one;
        let frac_zero = if n_reaching == 0 {
            root_frac_zero
        } else {
            n_zero as f64 / n_reaching as f64
        };
        let frac_one = 1.0 - frac_zero;

        let pure_class = if frac_zero == 1.0 {
            Some(0)
        } else if frac_one == 1.0 {
            Some(1)
        } else {
            None
        };

        Self {
            entropy: binary_entropy(frac_zero),
            n_reaching,
            frac_zero,
            pure_class,
        }
    }
}

/// One candidate attribute together with its information gain
/// and the statistics of both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SplitCandidate {
    pub(crate) attribute: usize,
    pub(crate) gain: f64,
    pub(crate) left: SideStats,
    pub(crate) right: SideStats,
}

impl SplitCandidate {
    fn excluded(attribute: usize, root_frac_zero: f64) -> Self {
        let side = SideStats::from_counts(0, 0, root_frac_zero);
        Self {
            attribute,
            gain: EXCLUDED_GAIN,
            left: side,
            right: side,
        }
    }
}

/// Base-2 entropy of a binary distribution given
/// the probability of class `0`.
/// A term whose probability is `0` contributes `0`,
/// so a pure distribution has entropy exactly `0.0`
/// and an even one exactly `1.0`.
#[inline(always)]
pub fn binary_entropy(frac_zero: f64) -> f64 {
    let frac_one = 1.0 - frac_zero;
    let log_zero = if frac_zero == 0.0 { 0.0 } else { frac_zero.log2() };
    let log_one = if frac_one == 0.0 { 0.0 } else { frac_one.log2() };

    -frac_zero * log_zero - frac_one * log_one
}

/// Score every attribute as a split of the rows in `reaching`.
/// Attributes in `used` (an ancestor already split on them)
/// get the gain [`EXCLUDED_GAIN`];
/// every other attribute partitions `reaching` by its value and
/// gets `parent_entropy` minus the count-weighted entropy of the sides.
/// The returned candidates are ordered by attribute index.
pub(crate) fn scan(
    table: &Table,
    reaching: &[usize],
    used: &FixedBitSet,
    parent_entropy: f64,
    parent_n: usize,
    root_frac_zero: f64,
) -> Vec<SplitCandidate>
{
    let n_attributes = table.shape().1;

    (0..n_attributes)
        .into_par_iter()
        .map(|attribute| {
            if used.contains(attribute) {
                return SplitCandidate::excluded(attribute, root_frac_zero);
            }

            // counts[side][class]
            let mut counts = [[0usize; 2]; 2];
            for &row in reaching {
                let side = table.value(row, attribute) as usize;
                let class = table.class_of(row) as usize;
                counts[side][class] += 1;
            }

            let left = SideStats::from_counts(
                counts[0][0], counts[0][1], root_frac_zero,
            );
            let right = SideStats::from_counts(
                counts[1][0], counts[1][1], root_frac_zero,
            );

            let gain = parent_entropy
                - (left.entropy
                    * (left.n_reaching as f64 / parent_n as f64)
                    + right.entropy
                    * (right.n_reaching as f64 / parent_n as f64));

            SplitCandidate { attribute, gain, left, right }
        })
        .collect::<Vec<_>>()
}

/// Pick the candidate of maximal gain.
/// The comparison is a strict `>` against the running best,
/// so the lowest attribute index wins a tie.
pub(crate) fn best_candidate(candidates: Vec<SplitCandidate>)
    -> SplitCandidate
{
    candidates.into_iter()
        .reduce(|best, candidate| {
            if candidate.gain > best.gain { candidate } else { best }
        })
        .expect("no candidate attribute to split on")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_table() -> Table {
        let attributes = ["a", "b", "class"].iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        let rows = vec![
            vec![0, 0, 0],
            vec![0, 1, 0],
            vec![1, 0, 1],
            vec![1, 1, 1],
        ];
        Table::from_raw(attributes, rows)
    }

    #[test]
    fn test_binary_entropy_01() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
    }

    #[test]
    fn test_binary_entropy_02() {
        assert_eq!(binary_entropy(0.5), 1.0);
    }

    #[test]
    fn test_side_stats_01() {
        let stats = SideStats::from_counts(3, 0, 0.5);
        assert_eq!(stats.entropy, 0.0);
        assert_eq!(stats.frac_zero, 1.0);
        assert_eq!(stats.pure_class, Some(0));
    }

    #[test]
    fn test_side_stats_02() {
        // A zero-row side borrows the root's fraction.
        let stats = SideStats::from_counts(0, 0, 0.25);
        assert_eq!(stats.n_reaching, 0);
        assert_eq!(stats.frac_zero, 0.25);
        assert!(stats.frac_zero.is_finite());
        assert_eq!(stats.pure_class, None);
    }

    #[test]
    fn test_scan_01() {
        // Attribute `a` separates the classes perfectly.
        let table = toy_table();
        let reaching = [0, 1, 2, 3];
        let used = FixedBitSet::with_capacity(2);

        let candidates = scan(&table, &reaching, &used, 1.0, 4, 0.5);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].gain, 1.0);
        assert_eq!(candidates[0].left.pure_class, Some(0));
        assert_eq!(candidates[0].right.pure_class, Some(1));
        assert_eq!(candidates[1].gain, 0.0);

        let best = best_candidate(candidates);
        assert_eq!(best.attribute, 0);
    }

    #[test]
    fn test_scan_02() {
        // A used attribute always carries the excluded gain.
        let table = toy_table();
        let reaching = [0, 1, 2, 3];
        let mut used = FixedBitSet::with_capacity(2);
        used.insert(0);

        let candidates = scan(&table, &reaching, &used, 1.0, 4, 0.5);
        assert_eq!(candidates[0].gain, EXCLUDED_GAIN);

        let best = best_candidate(candidates);
        assert_eq!(best.attribute, 1);
    }

    #[test]
    fn test_best_candidate_tie_01() {
        // Equal gains resolve to the lowest attribute index.
        let side = SideStats::from_counts(1, 1, 0.5);
        let candidates = vec![
            SplitCandidate { attribute: 0, gain: 0.0, left: side, right: side },
            SplitCandidate { attribute: 1, gain: 0.0, left: side, right: side },
        ];
        let best = best_candidate(candidates);
        assert_eq!(best.attribute, 0);
    }
}

//! Sequence alignment shared by list comparison and multi-line text diffs.

use tracing::debug;

/// Above this many table cells the middle of two sequences is left
/// unaligned, so its items end up paired positionally.
const MAX_TABLE_CELLS: usize = 1 << 22;

/// Index pairs `(i, j)` with `before[i] == after[j]` forming a longest common
/// subsequence, in increasing order on both sides.
///
/// Common leading and trailing items are matched directly. Only the middle
/// goes through the quadratic table, and only while it fits
/// [`MAX_TABLE_CELLS`].
pub fn longest_common_subsequence<T: PartialEq>(before: &[T], after: &[T]) -> Vec<(usize, usize)> {
    let prefix = before
        .iter()
        .zip(after)
        .take_while(|(old, new)| old == new)
        .count();
    let suffix = before[prefix..]
        .iter()
        .rev()
        .zip(after[prefix..].iter().rev())
        .take_while(|(old, new)| old == new)
        .count();

    let (before_end, after_end) = (before.len() - suffix, after.len() - suffix);
    let middle = table_alignment(&before[prefix..before_end], &after[prefix..after_end]);

    let mut pairs = Vec::with_capacity(prefix + middle.len() + suffix);
    pairs.extend((0..prefix).map(|i| (i, i)));
    pairs.extend(middle.into_iter().map(|(i, j)| (prefix + i, prefix + j)));
    pairs.extend((0..suffix).map(|k| (before_end + k, after_end + k)));
    pairs
}

fn table_alignment<T: PartialEq>(before: &[T], after: &[T]) -> Vec<(usize, usize)> {
    let (n, m) = (before.len(), after.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }

    let width = m + 1;
    if (n + 1).saturating_mul(width) > MAX_TABLE_CELLS {
        debug!("Not aligning {} against {} items, pairing them by position", n, m);
        return Vec::new();
    }

    // lengths[i * width + j] is the LCS length of before[i..] and after[j..]
    let mut lengths = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i * width + j] = if before[i] == after[j] {
                lengths[(i + 1) * width + j + 1] + 1
            } else {
                lengths[(i + 1) * width + j].max(lengths[i * width + j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(lengths[0] as usize);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if before[i] == after[j] {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if lengths[(i + 1) * width + j] >= lengths[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

/// A run of unmatched items between two aligned positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gap {
    pub before: std::ops::Range<usize>,
    pub after: std::ops::Range<usize>,
}

/// Splits two sequences into the gaps left around their common subsequence.
/// Empty gaps are skipped.
pub fn gaps<T: PartialEq>(before: &[T], after: &[T]) -> Vec<Gap> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);

    let anchors = longest_common_subsequence(before, after)
        .into_iter()
        .chain(std::iter::once((before.len(), after.len())));

    for (next_i, next_j) in anchors {
        if next_i > i || next_j > j {
            result.push(Gap {
                before: i..next_i,
                after: j..next_j,
            });
        }
        i = next_i + 1;
        j = next_j + 1;
    }
    result
}

/// Line based diff of two texts: `-` for removed lines, `+` for added ones
/// and a space for common ones.
pub fn text_diff(before: &str, after: &str) -> String {
    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();

    let mut out = Vec::with_capacity(old.len().max(new.len()));
    let (mut i, mut j) = (0, 0);

    for (next_i, next_j) in longest_common_subsequence(&old, &new)
        .into_iter()
        .chain(std::iter::once((old.len(), new.len())))
    {
        out.extend(old[i..next_i].iter().map(|line| format!("-{line}")));
        out.extend(new[j..next_j].iter().map(|line| format!("+{line}")));
        if let Some(line) = old.get(next_i) {
            out.push(format!(" {line}"));
        }
        i = next_i + 1;
        j = next_j + 1;
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcs_of_shifted_lists() {
        let pairs = longest_common_subsequence(&[1, 2, 3, 4], &[2, 3, 4, 5]);
        assert_eq!(pairs, vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn lcs_of_disjoint_lists_is_empty() {
        assert!(longest_common_subsequence(&[1, 2], &[3]).is_empty());
        assert!(longest_common_subsequence::<i32>(&[], &[]).is_empty());
    }

    #[test]
    fn gaps_around_common_items() {
        let result = gaps(&[1, 2, 3, 4], &[2, 3, 4, 5]);
        assert_eq!(
            result,
            vec![
                Gap {
                    before: 0..1,
                    after: 0..0
                },
                Gap {
                    before: 4..4,
                    after: 3..4
                },
            ]
        );
    }

    #[test]
    fn trailing_removal_is_one_gap() {
        let result = gaps(&[1, 2, 3], &[1, 2]);
        assert_eq!(
            result,
            vec![Gap {
                before: 2..3,
                after: 2..2
            }]
        );
    }

    #[test]
    fn identical_sequences_have_no_gaps() {
        assert!(gaps(&["a", "b"], &["a", "b"]).is_empty());
    }

    #[test]
    fn common_ends_are_matched_around_the_middle() {
        let pairs = longest_common_subsequence(&[0, 1, 2, 9, 3], &[0, 1, 7, 2, 3]);
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 3), (4, 4)]);
    }

    #[test]
    fn long_single_removal() {
        let before: Vec<usize> = (0..5000).collect();
        let after: Vec<usize> = before.iter().copied().filter(|&i| i != 2500).collect();

        let result = gaps(&before, &after);
        assert_eq!(
            result,
            vec![Gap {
                before: 2500..2501,
                after: 2500..2500
            }]
        );
    }

    #[test]
    fn oversized_middle_is_left_unaligned() {
        let before: Vec<usize> = (0..5000).collect();
        let after: Vec<usize> = (0..5000).rev().collect();

        assert!(longest_common_subsequence(&before, &after).is_empty());
        assert_eq!(
            gaps(&before, &after),
            vec![Gap {
                before: 0..5000,
                after: 0..5000
            }]
        );
    }

    #[test]
    fn text_diff_marks_lines() {
        let diff = text_diff("hello\nthere\n!\n", "hello\n\nworld\n");
        assert_eq!(diff, " hello\n-there\n-!\n+\n+world");
    }
}

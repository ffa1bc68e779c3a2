//! Ratcliff/Obershelp sequence similarity.
//!
//! Reproduces the ratio computed by Python's `difflib.SequenceMatcher` with no
//! junk predicate and `autojunk` enabled, operating on Unicode scalar values.
//! The fuzzy-search threshold is tuned against that scale, so the matching
//! block search below keeps its tie-breaking and popularity rules intact.

use std::collections::HashMap;

/// Sequences at least this long have their popular elements ignored when
/// searching for matching blocks.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A run of `len` equal elements at `a[i..]` and `b[j..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    i: usize,
    j: usize,
    len: usize,
}

struct Matcher<'s> {
    a: &'s [char],
    b: &'s [char],
    // Positions of each element of `b`, ascending, minus popular elements.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> Matcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= ntest);
        }
        Matcher { a, b, b2j }
    }

    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (a, b) = (self.a, self.b);
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut new_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular elements were left out of b2j; grow the block over them.
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Block {
            i: besti,
            j: bestj,
            len: bestsize,
        }
    }

    fn matching_blocks(&self) -> Vec<Block> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.len == 0 {
                continue;
            }
            if alo < m.i && blo < m.j {
                queue.push((alo, m.i, blo, m.j));
            }
            if m.i + m.len < ahi && m.j + m.len < bhi {
                queue.push((m.i + m.len, ahi, m.j + m.len, bhi));
            }
            blocks.push(m);
        }
        blocks.sort_by_key(|m| (m.i, m.j));
        blocks
    }
}

/// Similarity of two strings in `[0, 1]`: twice the number of matched
/// characters over the total number of characters. Two empty strings are
/// identical (1.0).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches: usize = Matcher::new(&a, &b)
        .matching_blocks()
        .iter()
        .map(|m| m.len)
        .sum();
    2.0 * matches as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_golden_ratios() {
        // Values produced by difflib.SequenceMatcher(None, a, b).ratio()
        assert_close(ratio("abcd", "bcde"), 0.75);
        assert_close(ratio("", ""), 1.0);
        assert_close(ratio("abc", ""), 0.0);
        assert_close(ratio("hello", "hello"), 1.0);
        assert_close(ratio("abc", "xyz"), 0.0);
        assert_close(ratio("hao", "nǐ hǎo"), 4.0 / 9.0);
        assert_close(ratio("greet", "to greet someone"), 10.0 / 21.0);
        assert_close(ratio("ni hao", "nihao"), 10.0 / 11.0);
    }

    #[test]
    fn test_ratio_is_asymmetric_like_difflib() {
        // "tide"/"diet": the first longest block differs by argument order.
        assert_close(ratio("tide", "diet"), 0.25);
        assert_close(ratio("diet", "tide"), 0.5);
    }

    #[test]
    fn test_matching_blocks_recurse_on_both_sides() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        let blocks = Matcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks,
            vec![Block { i: 0, j: 0, len: 2 }, Block { i: 3, j: 2, len: 2 }]
        );
    }

    #[test]
    fn test_autojunk_ignores_popular_characters() {
        // With 200+ characters, 'a' occurs more than 1% + 1 times and is
        // dropped from the index, so nothing anchors a block for "xaa".
        assert_close(ratio("xaa", &"a".repeat(250)), 0.0);
        // Below the threshold every character is indexed.
        assert_close(ratio("xaa", &"a".repeat(150)), 4.0 / 153.0);
    }

    #[test]
    fn test_popular_characters_extend_an_anchored_block() {
        // 'b' anchors the block and the popular 'a's around it are absorbed.
        let b = format!("{}b{}", "a".repeat(150), "a".repeat(100));
        assert_close(ratio("aba", &b), 6.0 / 254.0);
        // Without any anchor the block still grows over equal leading characters.
        assert_close(ratio("a", &"a".repeat(250)), 2.0 / 251.0);
    }
}

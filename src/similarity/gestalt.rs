use std::collections::HashMap;

/// Ratcliff/Obershelp ("gestalt pattern matching") similarity against a fixed query.
///
/// The ratio is `2 * M / T`, where `T` is the combined length of both strings
/// and `M` the number of characters in the matching blocks found by
/// recursively taking the longest common substring and repeating on the
/// pieces either side of it. The query is indexed once so that scoring many
/// candidates against it is cheap.
pub struct GestaltMatcher {
    query: Vec<char>,
    index: HashMap<char, Vec<usize>>,
    counts: HashMap<char, usize>,
}

impl GestaltMatcher {
    /// With `autojunk`, characters making up more than 1% of a query of 200+
    /// characters are left out of the index; matches can still grow across them.
    pub fn new(query: &str, autojunk: bool) -> Self {
        let query: Vec<char> = query.chars().collect();
        let mut index: HashMap<char, Vec<usize>> = HashMap::new();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for (j, &c) in query.iter().enumerate() {
            index.entry(c).or_default().push(j);
            *counts.entry(c).or_insert(0) += 1;
        }

        let n = query.len();
        if autojunk && n >= 200 {
            let ntest = n / 100 + 1;
            index.retain(|_, positions| positions.len() <= ntest);
        }

        Self {
            query,
            index,
            counts,
        }
    }

    /// Upper bound on [`ratio`](Self::ratio) from the lengths alone.
    pub fn real_quick_ratio(&self, candidate: &str) -> f64 {
        let la = candidate.chars().count();
        let lb = self.query.len();
        score(la.min(lb), la + lb)
    }

    /// Upper bound on [`ratio`](Self::ratio) from shared character counts.
    pub fn quick_ratio(&self, candidate: &str) -> f64 {
        let mut available: HashMap<char, usize> = HashMap::new();
        let mut matches = 0usize;
        let mut la = 0usize;
        for c in candidate.chars() {
            la += 1;
            let left = available
                .entry(c)
                .or_insert_with(|| self.counts.get(&c).copied().unwrap_or(0));
            if *left > 0 {
                *left -= 1;
                matches += 1;
            }
        }
        score(matches, la + self.query.len())
    }

    pub fn ratio(&self, candidate: &str) -> f64 {
        let a: Vec<char> = candidate.chars().collect();
        score(self.matched_chars(&a), a.len() + self.query.len())
    }

    fn matched_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, a.len(), 0, self.query.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
            if k > 0 {
                total += k;
                if alo < i && blo < j {
                    pending.push((alo, i, blo, j));
                }
                if i + k < ahi && j + k < bhi {
                    pending.push((i + k, ahi, j + k, bhi));
                }
            }
        }
        total
    }

    /// Longest block with `a[i..i+k] == query[j..j+k]` inside the given bounds.
    /// Ties go to the block starting earliest in `a`, then earliest in the query.
    fn longest_match(&self, a: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let b = &self.query;
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);

        let mut run_ending_at: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_runs = HashMap::new();
            if let Some(positions) = self.index.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j > 0 {
                        run_ending_at.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    } + 1;
                    next_runs.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            run_ending_at = next_runs;
        }

        // grow across characters dropped from the index
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi && bestj + bestsize < bhi && a[besti + bestsize] == b[bestj + bestsize] {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }
}

fn score(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_disjoint() {
        let m = GestaltMatcher::new("ACGTACGT", false);
        assert_eq!(m.ratio("ACGTACGT"), 1.0);
        assert_eq!(m.ratio("NNNN"), 0.0);
        assert_eq!(GestaltMatcher::new("", false).ratio(""), 1.0);
    }

    #[test]
    fn test_known_ratios() {
        // "abcd" vs "bcde": block "bcd" -> 2*3/8
        assert_eq!(GestaltMatcher::new("bcde", false).ratio("abcd"), 0.75);
        // blocks "ab" and "cd" -> 2*4/10
        let r = GestaltMatcher::new("abcd", false).ratio("qabxcd");
        assert!((r - 0.8).abs() < 1e-12, "{}", r);
        // "AACC" vs "AATT": block "AA" -> 2*2/8
        assert_eq!(GestaltMatcher::new("AATT", false).ratio("AACC"), 0.5);
    }

    #[test]
    fn test_bounds_dominate_ratio() {
        let m = GestaltMatcher::new("ACGTTGCAACGT", false);
        for cand in ["ACGT", "TTGCAAC", "GGGGGGGGGGGGGGGG", "ACGTTGCAACGA", ""] {
            let r = m.ratio(cand);
            assert!(m.quick_ratio(cand) >= r);
            assert!(m.real_quick_ratio(cand) >= m.quick_ratio(cand));
        }
    }

    #[test]
    fn test_autojunk_only_affects_long_queries() {
        let short = "ACGTACGTAC";
        assert_eq!(
            GestaltMatcher::new(short, true).ratio("ACGTAAGTAC"),
            GestaltMatcher::new(short, false).ratio("ACGTAAGTAC")
        );

        let long: String = "ACGT".repeat(60);
        let shifted = format!("C{}", long);
        let junked = GestaltMatcher::new(&long, true);
        // every symbol is popular, so nothing is indexed and only an aligned
        // prefix can still be grown into a match
        assert_eq!(junked.ratio(&long), 1.0);
        assert_eq!(junked.ratio(&shifted), 0.0);
        assert!(GestaltMatcher::new(&long, false).ratio(&shifted) > 0.99);
    }
}

//! Pattern matching: Knuth-Morris-Pratt and Rabin-Karp.
//!
//! `compare` steps carry `[text_index, pattern_index]`, except during the
//! KMP table build where both indices point into the pattern. A verdict
//! `highlight` follows each character check and every occurrence is reported
//! as a `found` covering the whole matched range.

use algoviz_core::{AnimationStep, StepLog, Verdict};

/// Longest-proper-prefix-that-is-also-a-suffix table for `pattern`.
pub fn lps_table(pattern: &[char]) -> Vec<usize> {
    let mut lps = vec![0; pattern.len()];
    let mut len = 0;
    let mut i = 1;
    while i < pattern.len() {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            i += 1;
        }
    }
    lps
}

/// KMP: the LPS table is built into the aux track, then the text is scanned
/// with table-driven fallback on mismatch.
pub fn kmp(text: &str, pattern: &str) -> StepLog {
    let mut steps = StepLog::new();
    if text.is_empty() || pattern.is_empty() {
        return steps;
    }
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());

    let mut lps = vec![0usize; m];
    let mut len = 0;
    let mut i = 1;
    steps.push(AnimationStep::update_aux(0, 0));
    while i < m {
        steps.push(AnimationStep::compare([i, len]));
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            steps.push(AnimationStep::update_aux(i, len as i64));
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            steps.push(AnimationStep::update_aux(i, 0));
            i += 1;
        }
    }

    let (mut t, mut p) = (0, 0);
    while t < n {
        steps.push(AnimationStep::compare([t, p]));
        if text[t] == pattern[p] {
            steps.push(AnimationStep::verdict([t], Verdict::Match));
            t += 1;
            p += 1;
            if p == m {
                steps.push(AnimationStep::found((t - m..t).collect::<Vec<_>>()));
                p = lps[p - 1];
            }
        } else {
            steps.push(AnimationStep::verdict([t], Verdict::Mismatch));
            if p != 0 {
                p = lps[p - 1];
            } else {
                t += 1;
            }
        }
    }
    steps
}

/// Rolling-hash parameters. A small modulus makes spurious hash hits
/// frequent, which is useful for showing the verification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RabinKarpParams {
    pub base: u64,
    pub modulus: u64,
}

impl Default for RabinKarpParams {
    fn default() -> Self {
        Self {
            base: 256,
            modulus: 101,
        }
    }
}

/// Rabin-Karp with the default hash parameters.
pub fn rabin_karp(text: &str, pattern: &str) -> StepLog {
    rabin_karp_with(text, pattern, RabinKarpParams::default())
}

/// Rabin-Karp. Aux slot 0 holds the pattern hash and slot 1 the current
/// window hash. Windows whose hash matches are verified character by
/// character; a mismatch there is a false positive.
pub fn rabin_karp_with(text: &str, pattern: &str, params: RabinKarpParams) -> StepLog {
    let mut steps = StepLog::new();
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (n, m) = (text.len(), pattern.len());
    if n == 0 || m == 0 || m > n {
        return steps;
    }
    let q = params.modulus.max(1);
    let d = params.base % q;
    let code = |c: char| u64::from(c) % q;

    // d^(m-1) mod q, the weight of the leading character
    let mut lead = 1 % q;
    for _ in 1..m {
        lead = lead * d % q;
    }
    let mut p_hash = 0;
    let mut t_hash = 0;
    for k in 0..m {
        p_hash = (d * p_hash + code(pattern[k])) % q;
        t_hash = (d * t_hash + code(text[k])) % q;
    }
    steps.push(AnimationStep::update_aux(0, p_hash as i64));
    steps.push(AnimationStep::update_aux(1, t_hash as i64));

    for i in 0..=n - m {
        steps.push(AnimationStep::compare([i, 0]));
        if p_hash == t_hash {
            let mut matched = true;
            for j in 0..m {
                steps.push(AnimationStep::compare([i + j, j]));
                if text[i + j] != pattern[j] {
                    steps.push(AnimationStep::verdict([i + j], Verdict::Mismatch));
                    matched = false;
                    break;
                }
                steps.push(AnimationStep::verdict([i + j], Verdict::Match));
            }
            if matched {
                steps.push(AnimationStep::found((i..i + m).collect::<Vec<_>>()));
            }
        } else {
            steps.push(AnimationStep::verdict([i], Verdict::Mismatch));
        }

        if i < n - m {
            let without_lead = (t_hash + q - code(text[i]) * lead % q) % q;
            t_hash = (d * without_lead + code(text[i + m])) % q;
            steps.push(AnimationStep::update_aux(1, t_hash as i64));
        }
    }
    steps
}

/// Start offsets of every `found` range in a matcher's log.
pub fn match_starts(steps: &[AnimationStep]) -> Vec<usize> {
    steps
        .iter()
        .filter_map(|s| match s {
            AnimationStep::Found { indices } => indices.first().copied(),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(text: &str, pattern: &str) -> Vec<usize> {
        let t: Vec<char> = text.chars().collect();
        let p: Vec<char> = pattern.chars().collect();
        if p.is_empty() || p.len() > t.len() {
            return Vec::new();
        }
        (0..=t.len() - p.len()).filter(|&i| t[i..i + p.len()] == p[..]).collect()
    }

    #[test]
    fn lps_of_classic_pattern() {
        let p: Vec<char> = "AAACAAAA".chars().collect();
        assert_eq!(lps_table(&p), vec![0, 1, 2, 0, 1, 2, 3, 3]);
    }

    #[test]
    fn kmp_table_build_fills_aux_track() {
        let steps = kmp("xyz", "ABAB");
        let aux: Vec<(usize, i64)> = steps
            .iter()
            .filter_map(|s| match s {
                AnimationStep::UpdateAux { indices, value } => Some((indices[0], *value)),
                _ => None,
            })
            .collect();
        assert_eq!(aux, vec![(0, 0), (1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn matchers_agree_with_naive_search() {
        let cases = [
            ("ABABDABACDABABCABAB", "ABABCABAB"),
            ("AAAAA", "AA"),
            ("abcabcabc", "cab"),
            ("hello", "xyz"),
            ("short", "much longer"),
            ("aaa", "aaa"),
        ];
        for (text, pattern) in cases {
            let expected = naive(text, pattern);
            assert_eq!(match_starts(&kmp(text, pattern)), expected, "kmp {:?}", (text, pattern));
            assert_eq!(
                match_starts(&rabin_karp(text, pattern)),
                expected,
                "rabin-karp {:?}",
                (text, pattern)
            );
        }
    }

    #[test]
    fn found_covers_full_range() {
        let steps = kmp("xxABCxx", "ABC");
        let found: Vec<&AnimationStep> = steps
            .iter()
            .filter(|s| matches!(s, AnimationStep::Found { .. }))
            .collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].indices(), &[2, 3, 4]);
    }

    #[test]
    fn tiny_modulus_exposes_false_positives() {
        let params = RabinKarpParams { base: 256, modulus: 1 };
        let steps = rabin_karp_with("abcd", "bd", params);
        // every window hashes equal, yet only real matches are reported
        assert!(match_starts(&steps).is_empty());
        let verifications = steps
            .iter()
            .filter(|s| matches!(s, AnimationStep::Compare { indices } if indices[1] == 0))
            .count();
        assert!(verifications > 3);
    }

    #[test]
    fn empty_inputs_produce_nothing() {
        assert!(kmp("", "a").is_empty());
        assert!(kmp("a", "").is_empty());
        assert!(rabin_karp("", "a").is_empty());
        assert!(rabin_karp("ab", "abc").is_empty());
    }
}

/// The kind of match that was produced. Prefix matches order above
/// subsequence matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// `query` is a scattered subsequence of `candidate`.
    Fuzzy,
    /// `candidate` starts with `query`.
    Prefix,
}

/// Score returned by [`fuzzy_match`]. Ordered by kind, then score; greater
/// is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchScore {
    pub kind: MatchKind,
    pub score: i32,
}

const BASE_MATCH: i32 = 10;
const BONUS_WORD_START: i32 = 15;
const BONUS_CONSECUTIVE: i32 = 5;
const BONUS_SAME_CASE: i32 = 2;
const GAP_PENALTY: i32 = 1;
const LEADING_PENALTY: i32 = 1;
const TRAILING_PENALTY: i32 = 1;

#[inline]
fn eq_folded(a: u8, b: u8) -> bool {
    a.to_ascii_lowercase() == b.to_ascii_lowercase()
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b'_' | b'-' | b'.' | b'$' | b':' | b'/' | b' ')
}

/// Word starts in Java-ish identifiers: after a separator, at a lower-to-upper
/// camel hump and at letter/digit transitions.
fn word_starts(candidate: &[u8]) -> Vec<bool> {
    (0..candidate.len())
        .map(|i| {
            if i == 0 {
                return true;
            }
            let (prev, cur) = (candidate[i - 1], candidate[i]);
            is_separator(prev)
                || (prev.is_ascii_lowercase() && cur.is_ascii_uppercase())
                || (prev.is_ascii_alphabetic() != cur.is_ascii_alphabetic()
                    && prev.is_ascii_alphanumeric()
                    && cur.is_ascii_alphanumeric())
        })
        .collect()
}

fn char_score(query: u8, candidate: u8, word_start: bool) -> i32 {
    let mut score = BASE_MATCH;
    if word_start {
        score += BONUS_WORD_START;
    }
    if query == candidate {
        score += BONUS_SAME_CASE;
    }
    score
}

fn subsequence_score(query: &[u8], candidate: &[u8]) -> Option<i32> {
    if query.len() > candidate.len() {
        return None;
    }

    let starts = word_starts(candidate);
    // best[j]: best score with the current query char placed at candidate[j].
    let mut best: Vec<Option<i32>> = candidate
        .iter()
        .enumerate()
        .map(|(j, &c)| {
            eq_folded(query[0], c)
                .then(|| char_score(query[0], c, starts[j]) - LEADING_PENALTY * j as i32)
        })
        .collect();

    for &q in &query[1..] {
        let mut next = vec![None; candidate.len()];
        for (j, &c) in candidate.iter().enumerate() {
            if !eq_folded(q, c) {
                continue;
            }
            let from_prev = best[..j]
                .iter()
                .enumerate()
                .filter_map(|(k, score)| {
                    let score = (*score)?;
                    let gap = (j - k - 1) as i32;
                    Some(if gap == 0 {
                        score + BONUS_CONSECUTIVE
                    } else {
                        score - GAP_PENALTY * gap
                    })
                })
                .max();
            next[j] = from_prev.map(|prev| prev + char_score(q, c, starts[j]));
        }
        best = next;
    }

    best.iter()
        .enumerate()
        .filter_map(|(j, score)| {
            let trailing = (candidate.len() - 1 - j) as i32;
            score.map(|s| s - TRAILING_PENALTY * trailing)
        })
        .max()
}

/// Fuzzy match `query` against `candidate`.
///
/// Prefix matches short-circuit and always rank above subsequence matches;
/// among prefixes the shorter candidate wins.
pub fn fuzzy_match(query: &str, candidate: &str) -> Option<MatchScore> {
    let (q, c) = (query.as_bytes(), candidate.as_bytes());

    if q.len() <= c.len() && q.iter().zip(c).all(|(&a, &b)| eq_folded(a, b)) {
        return Some(MatchScore {
            kind: MatchKind::Prefix,
            score: 1_000_000 - candidate.len() as i32,
        });
    }

    subsequence_score(q, c).map(|score| MatchScore {
        kind: MatchKind::Fuzzy,
        score,
    })
}

use crate::scoring::{fuzzy_match, MatchKind};

/// How closely a declared name resembles the name being looked for.
///
/// Variants are ordered best-first, so sorting ascending ranks candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Similarity {
    /// Equal ignoring ASCII case.
    SameIgnoringCase,
    /// One name starts with the other.
    Prefix { extra: usize },
    /// A few characters were mistyped, dropped or added.
    Typo { distance: usize },
    /// The query reads as an abbreviation of the candidate (`initDS` for
    /// `initDataSource`). Lower penalty is better.
    Abbreviation { penalty: i32 },
}

/// Levenshtein distance over ASCII-folded bytes.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diag + usize::from(!ca.eq_ignore_ascii_case(&cb));
            diag = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }
    row[b.len()]
}

/// Typos tolerated for a name of `len` bytes.
fn typo_budget(len: usize) -> usize {
    (len / 3).max(1)
}

/// Rate `candidate` as a replacement for the unresolved `query`.
///
/// Returns `None` for identical names (nothing to propose) and for names that
/// do not resemble each other.
pub fn similarity(query: &str, candidate: &str) -> Option<Similarity> {
    if query.is_empty() || candidate.is_empty() || query == candidate {
        return None;
    }
    if query.eq_ignore_ascii_case(candidate) {
        return Some(Similarity::SameIgnoringCase);
    }

    let (shorter, longer) = if query.len() <= candidate.len() {
        (query, candidate)
    } else {
        (candidate, query)
    };
    if fuzzy_match(shorter, longer).is_some_and(|s| s.kind == MatchKind::Prefix) {
        return Some(Similarity::Prefix {
            extra: longer.len() - shorter.len(),
        });
    }

    let distance = edit_distance(query, candidate);
    if distance <= typo_budget(shorter.len()) {
        return Some(Similarity::Typo { distance });
    }

    let score = fuzzy_match(query, candidate)?;
    let required = query.len() as i32 * 20;
    (score.score >= required).then_some(Similarity::Abbreviation {
        penalty: -score.score,
    })
}

#[inline]
pub fn is_similar_name(query: &str, candidate: &str) -> bool {
    similarity(query, candidate).is_some()
}

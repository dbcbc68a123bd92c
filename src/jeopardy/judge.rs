//! Free-text answer judging.
//!
//! A response must be phrased as a question ("What is ...") to count at
//! all during the normal and double rounds. Judging then compares the
//! stripped response against the canonical answer: exact match, a
//! single-word match on a significant word, or a Levenshtein similarity
//! of at least 70% against any significant word. Significant words are
//! the answer's words minus any word that also appears in the clue, so
//! echoing the clue back is never enough.

use crate::constants::SIMILARITY_THRESHOLD;

/// The recognized interrogative prefixes, matched case-insensitively.
pub const ANSWER_PREFIXES: [&str; 8] = [
    "what is", "who is", "what are", "who are", "what was", "who was", "what were", "who were",
];

pub fn has_answer_prefix(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    ANSWER_PREFIXES.iter().any(|p| lowered.starts_with(p))
}

/// Removes a recognized prefix (and any following whitespace) from the
/// front of the response. Returns the input unchanged if none matches.
pub fn strip_answer_prefix(text: &str) -> String {
    let trimmed = text.trim();
    let lowered = trimmed.to_lowercase();
    for prefix in ANSWER_PREFIXES {
        if lowered.starts_with(prefix) {
            return trimmed[prefix.len()..].trim_start().to_string();
        }
    }
    trimmed.to_string()
}

/// Canonical form: parenthesized clarifications dropped, punctuation
/// stripped, lowercased, whitespace collapsed. "Paris (France)" → "paris".
pub fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            _ if c.is_alphanumeric() || c.is_whitespace() || c == '\'' => {
                out.extend(c.to_lowercase());
            }
            // Other punctuation reads as a word break.
            _ => out.push(' '),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The answer's words minus any word also present in the clue text. The
/// final round passes no clue, so every answer word is significant there.
pub fn significant_words(answer: &str, question: Option<&str>) -> Vec<String> {
    let canonical = canonicalize(answer);
    let clue_words: Vec<String> = question
        .map(|q| canonicalize(q).split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    canonical
        .split_whitespace()
        .filter(|w| !clue_words.iter().any(|cw| cw == w))
        .map(str::to_string)
        .collect()
}

/// Classic dynamic-programming Levenshtein distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Percentage similarity: `(maxLen - distance) / maxLen * 100`.
pub fn similarity_pct(a: &str, b: &str) -> u32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let distance = levenshtein(a, b);
    ((max_len.saturating_sub(distance)) * 100 / max_len) as u32
}

/// Judges a stripped response against the correct answer. Pass the clue
/// text for the normal and double rounds; pass `None` in the final round
/// so the full answer word set counts as significant.
pub fn is_correct(response: &str, answer: &str, question: Option<&str>) -> bool {
    let response = canonicalize(response);
    if response.is_empty() {
        return false;
    }
    let canonical = canonicalize(answer);
    if response == canonical {
        return true;
    }

    let significant = significant_words(answer, question);
    let response_words: Vec<&str> = response.split_whitespace().collect();

    // A bare single-word response may name any significant word exactly.
    if let [only] = response_words.as_slice() {
        if significant.iter().any(|w| w == only) {
            return true;
        }
    }

    response_words.iter().any(|rw| {
        significant
            .iter()
            .any(|sw| similarity_pct(rw, sw) >= SIMILARITY_THRESHOLD)
    })
}

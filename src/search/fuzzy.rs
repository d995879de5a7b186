//! Weighted fuzzy string similarity for matching user typed song titles.
//!
//! Scores are integers in `0..=100`. The weighted ratio combines a plain
//! similarity ratio with partial (substring) and token based variants so that
//! casing, punctuation, word order and extra words are tolerated.

use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.90;
const LONG_PARTIAL_SCALE: f64 = 0.60;

/// Lowercases, drops non ASCII characters and replaces everything that is not a
/// word character with a space.
pub fn preprocess(s: &str) -> String {
    let replaced: String = s
        .chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    replaced.trim().to_owned()
}

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Two rows instead of the full matrix
    let mut prev_row: Vec<usize> = vec![0; b.len() + 1];
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for a_char in a {
        for (j, b_char) in b.iter().enumerate() {
            curr_row[j + 1] = if a_char == b_char {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

fn chars_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    2.0 * lcs_length(a, b) as f64 / total as f64
}

fn to_score(value: f64) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Indel similarity: `2 * LCS / (|a| + |b|)`, as a score.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    to_score(chars_ratio(&a, &b))
}

/// Best ratio of the shorter string against every same-length window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        return 0;
    }

    let mut best = 0.0f64;
    for start in 0..=(longer.len() - shorter.len()) {
        let window = &longer[start..start + shorter.len()];
        let r = chars_ratio(&shorter, window);
        if r > 0.995 {
            return 100;
        }
        best = best.max(r);
    }
    to_score(best)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn partial_token_sort_ratio(a: &str, b: &str) -> u8 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set_with(a: &str, b: &str, scorer: fn(&str, &str) -> u8) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let intersection = join(tokens_a.intersection(&tokens_b).copied().collect());
    let diff_a = join(tokens_a.difference(&tokens_b).copied().collect());
    let diff_b = join(tokens_b.difference(&tokens_a).copied().collect());

    let combined_a = format!("{} {}", intersection, diff_a).trim().to_owned();
    let combined_b = format!("{} {}", intersection, diff_b).trim().to_owned();

    scorer(&intersection, &combined_a)
        .max(scorer(&intersection, &combined_b))
        .max(scorer(&combined_a, &combined_b))
}

pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, ratio)
}

fn partial_token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, partial_ratio)
}

/// Weighted ratio of two already preprocessed strings.
pub fn weighted_ratio_preprocessed(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = ratio(a, b) as f64;
    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let best = if len_ratio < 1.5 {
        base.max(token_sort_ratio(a, b) as f64 * UNBASE_SCALE)
            .max(token_set_ratio(a, b) as f64 * UNBASE_SCALE)
    } else {
        let partial_scale = if len_ratio > 8.0 {
            LONG_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        base.max(partial_ratio(a, b) as f64 * partial_scale)
            .max(partial_token_sort_ratio(a, b) as f64 * UNBASE_SCALE * partial_scale)
            .max(partial_token_set_ratio(a, b) as f64 * UNBASE_SCALE * partial_scale)
    };

    best.round().clamp(0.0, 100.0) as u8
}

pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    weighted_ratio_preprocessed(&preprocess(a), &preprocess(b))
}

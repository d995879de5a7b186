use super::fuzzy::{preprocess, weighted_ratio_preprocessed};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleMatch {
    /// Position of the matched title in the list the matcher was built from.
    pub position: usize,
    pub score: u8,
}

/// Fuzzy lookup over a fixed list of titles, preprocessed once at construction.
pub struct TitleMatcher {
    titles: Vec<String>,
}

impl TitleMatcher {
    pub fn new<'a>(titles: impl IntoIterator<Item = &'a str>) -> TitleMatcher {
        TitleMatcher {
            titles: titles.into_iter().map(preprocess).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Best scoring title for `query`. Among equal scores the earliest title wins.
    /// Returns `None` only when the matcher holds no titles.
    pub fn best_match(&self, query: &str) -> Option<TitleMatch> {
        let query = preprocess(query);
        let scores: Vec<u8> = self
            .titles
            .par_iter()
            .map(|title| weighted_ratio_preprocessed(&query, title))
            .collect();

        let mut best: Option<TitleMatch> = None;
        for (position, score) in scores.into_iter().enumerate() {
            match best {
                Some(b) if b.score >= score => {}
                _ => best = Some(TitleMatch { position, score }),
            }
            if score == 100 {
                break;
            }
        }
        best
    }
}

use regex::Regex;
use std::collections::BTreeSet;

/// Bag of words over genre labels.
///
/// Labels are lowercased and split into runs of two or more word characters, so
/// `"hip-hop"` yields `hip` and `hop`. The vocabulary is fixed at construction and
/// sorted, a token's position in it is its vector index.
pub struct GenreVectorizer {
    token_regex: Regex,
    vocabulary: Vec<String>,
}

impl GenreVectorizer {
    pub fn fit<'a>(labels: impl IntoIterator<Item = &'a str>) -> GenreVectorizer {
        let token_regex =
            Regex::new(r"\b\w\w+\b").expect("Invalid Regex, this should be fixed at compile time.");
        let vocabulary: BTreeSet<String> = labels
            .into_iter()
            .flat_map(|label| tokenize(&token_regex, label))
            .collect();
        GenreVectorizer {
            token_regex,
            vocabulary: vocabulary.into_iter().collect(),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Token counts of `label` over the vocabulary. Tokens outside the vocabulary are ignored.
    pub fn vectorize(&self, label: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for token in tokenize(&self.token_regex, label) {
            if let Ok(i) = self.vocabulary.binary_search(&token) {
                counts[i] += 1.0;
            }
        }
        counts
    }
}

fn tokenize(token_regex: &Regex, label: &str) -> Vec<String> {
    let lowercase = label.to_lowercase();
    token_regex
        .find_iter(&lowercase)
        .map(|m| m.as_str().to_owned())
        .collect()
}

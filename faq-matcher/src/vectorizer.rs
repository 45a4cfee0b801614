//! TF-IDF vectorizer compatible with the common smooth-idf, L2-normalised setup.
//!
//! - tokens: lower-cased words of two or more word characters
//! - idf: `ln((1 + n) / (1 + df)) + 1`
//! - weights: raw term count × idf, then L2 normalised

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::LazyLock,
};

use regex::Regex;
use tracing::debug;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token pattern is valid"));

/// Sparse vector as `(term index, weight)` pairs sorted by term index.
pub type SparseVec = Vec<(usize, f64)>;

/// Splits `text` into lower-cased word tokens; single characters are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fitted vocabulary plus per-term idf weights.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns the vocabulary and idf weights from `docs`.
    ///
    /// Term indices follow lexical order of the vocabulary.
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        let n_docs = docs.len() as f64;

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_default() += 1;
            }
        }

        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        debug!(docs = docs.len(), terms = idf.len(), "tf-idf fitted");
        Self { vocabulary, idf }
    }

    /// Vectorizes `text` against the fitted vocabulary. Unknown terms are ignored,
    /// so text with no known terms yields an empty (all-zero) vector.
    pub fn transform(&self, text: &str) -> SparseVec {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut weights: SparseVec = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }
        weights
    }

    /// idf weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }
}

/// Cosine similarity of two sparse vectors. Zero vectors score 0.
pub fn cosine(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    let norm_a = a.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn tokenizer_lowercases_and_drops_single_chars() {
        assert_eq!(
            tokenize("What is a Rust trait? I'd like 2 examples"),
            vec!["what", "is", "rust", "trait", "like", "examples"]
        );
    }

    #[test]
    fn smooth_idf_matches_formula() {
        let v = TfidfVectorizer::fit(&["apple banana", "apple cherry"]);

        assert_eq!(v.vocabulary_len(), 3);
        assert!((v.idf("apple").unwrap() - 1.0).abs() < EPS);
        let rare = (3.0f64 / 2.0).ln() + 1.0;
        assert!((v.idf("banana").unwrap() - rare).abs() < EPS);
        assert!(v.idf("durian").is_none());
    }

    #[test]
    fn transform_is_l2_normalised_and_counts_repeats() {
        let v = TfidfVectorizer::fit(&["apple banana", "apple cherry"]);
        let vec = v.transform("banana apple apple");

        let norm: f64 = vec.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < EPS);

        // apple (idf 1, tf 2) vs banana (idf ~1.405, tf 1)
        let rare = (3.0f64 / 2.0).ln() + 1.0;
        let ratio = vec[0].1 / vec[1].1;
        assert!((ratio - 2.0 / rare).abs() < EPS);
    }

    #[test]
    fn unknown_terms_give_zero_vector() {
        let v = TfidfVectorizer::fit(&["apple banana"]);
        let vec = v.transform("quantum entanglement");
        assert!(vec.is_empty());
        assert_eq!(cosine(&vec, &v.transform("apple")), 0.0);
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = TfidfVectorizer::fit(&["rust ownership rules", "sql joins"]);
        let a = v.transform("rust ownership rules");
        assert!((cosine(&a, &a) - 1.0).abs() < EPS);
        assert_eq!(cosine(&a, &v.transform("sql joins")), 0.0);
    }
}

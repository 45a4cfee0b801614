use std::path::Path;

use tracing::{debug, info};

use crate::{
    errors::{FaqError, Result},
    faq_entry::{FaqEntry, load_entries},
    vectorizer::{SparseVec, TfidfVectorizer, cosine},
};

/// Best-scoring corpus entry for a query.
#[derive(Debug, Clone, Copy)]
pub struct FaqMatch<'a> {
    /// Position of the entry in the corpus.
    pub index: usize,
    /// Cosine similarity in `0.0..=1.0`.
    pub score: f64,
    pub entry: &'a FaqEntry,
}

/// FAQ corpus fitted once; immutable afterwards.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
    vectorizer: TfidfVectorizer,
    question_vecs: Vec<SparseVec>,
}

impl FaqMatcher {
    /// Fits the vectorizer over the entries' questions.
    pub fn new(entries: Vec<FaqEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(FaqError::EmptyCorpus);
        }

        let questions: Vec<&str> = entries.iter().map(|e| e.question.as_str()).collect();
        let vectorizer = TfidfVectorizer::fit(&questions);
        let question_vecs = questions.iter().map(|q| vectorizer.transform(q)).collect();

        info!(
            entries = entries.len(),
            terms = vectorizer.vocabulary_len(),
            "faq matcher ready"
        );
        Ok(Self {
            entries,
            vectorizer,
            question_vecs,
        })
    }

    /// Loads the corpus from a JSON file and fits it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(load_entries(path)?)
    }

    /// Entry whose question is most similar to `query`.
    ///
    /// Ties go to the lowest index, so a query sharing no terms with the
    /// corpus resolves to the first entry.
    pub fn best_match(&self, query: &str) -> FaqMatch<'_> {
        let query_vec = self.vectorizer.transform(query);

        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, vec) in self.question_vecs.iter().enumerate() {
            let score = cosine(&query_vec, vec);
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }

        debug!(index = best_index, score = best_score, "faq best match");
        FaqMatch {
            index: best_index,
            score: best_score,
            entry: &self.entries[best_index],
        }
    }

    /// Answer text of [`best_match`](Self::best_match).
    pub fn answer(&self, query: &str) -> &str {
        &self.best_match(query).entry.answer
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }
}

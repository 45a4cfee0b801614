//! Nearest-question lookup over a static FAQ corpus using TF-IDF and cosine similarity.
//!
//! Not mounted on any HTTP route; embed it where a canned answer is wanted.
//!
//! ```no_run
//! use faq_matcher::FaqMatcher;
//!
//! let matcher = FaqMatcher::from_path("faq-matcher/data/faq.json")?;
//! println!("{}", matcher.answer("how do I learn sql"));
//! # Ok::<(), faq_matcher::FaqError>(())
//! ```

pub mod errors;
pub mod faq_entry;
pub mod matcher;
pub mod vectorizer;

pub use errors::FaqError;
pub use faq_entry::{FaqEntry, load_entries};
pub use matcher::{FaqMatch, FaqMatcher};
pub use vectorizer::{SparseVec, TfidfVectorizer, cosine, tokenize};

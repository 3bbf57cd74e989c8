//! TF-IDF Engine
//!
//! Local, offline term weighting over a fixed document set.
//!
//! ## Formulas
//!
//! * **IDF**: `ln((1 + N) / (1 + df)) + 1`, smoothed so terms present in
//!   every document still carry weight.
//! * **Term weight**: `(1 + ln(count)) * idf`.
//! * Every vector is L2-normalised; a vector with no recognised terms is empty.
//!
//! Vectors are sparse and keyed by vocabulary index in a `BTreeMap`, so dot
//! products always sum in the same order and repeated queries produce
//! bit-identical scores.

use std::collections::{BTreeMap, HashMap};

use crate::error::{CoreError, CoreResult};

/// Sparse, L2-normalised term vector (vocabulary index → weight).
pub type SparseVector = BTreeMap<usize, f64>;

/// TF-IDF model built once over a fixed set of tokenized documents.
///
/// Read-only after construction, so a single instance can be shared across
/// threads without locking.
#[derive(Debug, Clone)]
pub struct TfIdfEngine {
    /// Map from term → column index. Indices follow sorted term order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// One normalised vector per input document, in input order.
    document_vectors: Vec<SparseVector>,
}

impl TfIdfEngine {
    /// Build the engine from pre-tokenized documents.
    ///
    /// Individual documents may be empty (they get an empty vector), but the
    /// document list itself must not be.
    pub fn new<T: AsRef<str>>(documents: &[Vec<T>]) -> CoreResult<Self> {
        if documents.is_empty() {
            return Err(CoreError::config(
                "TF-IDF engine requires at least one document",
            ));
        }

        let term_counts: Vec<HashMap<&str, usize>> = documents
            .iter()
            .map(|doc| count_terms(doc))
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *doc_freq.entry(*term).or_insert(0) += 1;
            }
        }

        let total_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        // BTreeMap iteration is sorted, which fixes the column order.
        for (idx, (term, df)) in doc_freq.iter().enumerate() {
            vocabulary.insert((*term).to_string(), idx);
            idf.push(((1.0 + total_docs) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let mut engine = Self {
            vocabulary,
            idf,
            document_vectors: Vec::with_capacity(documents.len()),
        };
        let vectors: Vec<SparseVector> = term_counts
            .iter()
            .map(|counts| engine.weigh(counts))
            .collect();
        engine.document_vectors = vectors;
        Ok(engine)
    }

    /// Number of documents the engine was built from.
    pub fn document_count(&self) -> usize {
        self.document_vectors.len()
    }

    /// Number of distinct terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Column index of `term`, if it is part of the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Normalised vector for the document at `index`.
    pub fn document_vector(&self, index: usize) -> Option<&SparseVector> {
        self.document_vectors.get(index)
    }

    /// Transform a token sequence into a normalised vector.
    ///
    /// Tokens outside the vocabulary are ignored.
    pub fn transform<T: AsRef<str>>(&self, tokens: &[T]) -> SparseVector {
        self.weigh(&count_terms(tokens))
    }

    /// Cosine similarity of `tokens` against every document, in document order.
    pub fn similarities<T: AsRef<str>>(&self, tokens: &[T]) -> Vec<f64> {
        let query = self.transform(tokens);
        self.document_vectors
            .iter()
            .map(|doc| cosine_similarity(&query, doc))
            .collect()
    }

    fn weigh(&self, counts: &HashMap<&str, usize>) -> SparseVector {
        let mut vector = SparseVector::new();
        for (term, count) in counts {
            let Some(idx) = self.term_index(term) else {
                continue;
            };
            let weight = (1.0 + (*count as f64).ln()) * self.idf[idx];
            vector.insert(idx, weight);
        }
        normalize(vector)
    }
}

fn count_terms<T: AsRef<str>>(tokens: &[T]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// L2-normalise a sparse vector. A zero-norm vector becomes empty.
pub fn normalize(vector: SparseVector) -> SparseVector {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return SparseVector::new();
    }
    vector.into_iter().map(|(idx, w)| (idx, w / norm)).collect()
}

/// Cosine similarity between two normalised sparse vectors.
///
/// Iterates over the smaller vector; keys missing from the other count as 0.
/// Returns 0.0 when either vector is empty.
pub fn cosine_similarity(lhs: &SparseVector, rhs: &SparseVector) -> f64 {
    if lhs.is_empty() || rhs.is_empty() {
        return 0.0;
    }
    let (small, large) = if lhs.len() > rhs.len() {
        (rhs, lhs)
    } else {
        (lhs, rhs)
    };
    small
        .iter()
        .map(|(idx, weight)| weight * large.get(idx).copied().unwrap_or(0.0))
        .sum()
}

use crate::tokenizer::{clean_text, ngrams};
use crate::{DocId, TermId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Upper bound on vocabulary size.
pub const MAX_FEATURES: usize = 20_000;

/// Fixed vocabulary plus per-term inverse document frequency.
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    pub dictionary: HashMap<String, TermId>,
    pub idf: Vec<f64>,
}

/// One L2-normalized row per document in compressed sparse row layout.
/// Row `i` spans `indices[indptr[i]..indptr[i + 1]]`, column ids ascending.
#[derive(Debug, Clone, Default)]
pub struct DocumentMatrix {
    pub indptr: Vec<usize>,
    pub indices: Vec<TermId>,
    pub data: Vec<f64>,
}

impl DocumentMatrix {
    pub fn rows(&self) -> usize {
        self.indptr.len().saturating_sub(1)
    }

    pub fn row(&self, i: usize) -> (&[TermId], &[f64]) {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        (&self.indices[start..end], &self.data[start..end])
    }

    fn push_row(&mut self, row: Vec<(TermId, f64)>) {
        for (tid, w) in row {
            self.indices.push(tid);
            self.data.push(w);
        }
        self.indptr.push(self.indices.len());
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    pub space: VectorSpace,
    pub matrix: DocumentMatrix,
}

impl SimilarityIndex {
    pub fn build(texts: &[String]) -> Self {
        Self::with_max_features(texts, MAX_FEATURES)
    }

    /// Fit the vocabulary and weights over `texts` and vectorize every one of
    /// them. Row `i` of the matrix always corresponds to `texts[i]`.
    pub fn with_max_features(texts: &[String], max_features: usize) -> Self {
        let counts: Vec<HashMap<String, u32>> = texts.iter().map(|t| term_counts(t)).collect();

        let mut total: HashMap<&str, u64> = HashMap::new();
        let mut df: HashMap<&str, u32> = HashMap::new();
        for doc in &counts {
            for (term, &c) in doc {
                *total.entry(term.as_str()).or_insert(0) += c as u64;
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut kept: Vec<&str> = total.keys().copied().collect();
        if kept.len() > max_features {
            kept.sort_unstable_by(|a, b| total[b].cmp(&total[a]).then_with(|| a.cmp(b)));
            kept.truncate(max_features);
        }
        kept.sort_unstable();

        // idf = ln((1 + n) / (1 + df)) + 1
        let n = texts.len() as f64;
        let mut space = VectorSpace::default();
        for (tid, term) in kept.iter().enumerate() {
            space.dictionary.insert(term.to_string(), tid as TermId);
            space.idf.push(((1.0 + n) / (1.0 + df[term] as f64)).ln() + 1.0);
        }

        let mut matrix = DocumentMatrix::default();
        matrix.indptr.push(0);
        for doc in &counts {
            matrix.push_row(space.weigh(doc));
        }

        tracing::info!(
            num_docs = matrix.rows(),
            observed_terms = total.len(),
            vocabulary = space.dictionary.len(),
            nnz = matrix.indices.len(),
            "similarity index built"
        );
        Self { space, matrix }
    }

    pub fn num_docs(&self) -> usize {
        self.matrix.rows()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.space.dictionary.len()
    }

    pub fn nnz(&self) -> usize {
        self.matrix.indices.len()
    }

    /// Project free text into the fixed space. Terms outside the vocabulary
    /// are dropped; the result is sorted by term id.
    pub fn project(&self, text: &str) -> Vec<(TermId, f64)> {
        self.space.weigh(&term_counts(&clean_text(text)))
    }

    /// Cosine similarity of `text` against every document.
    pub fn scores(&self, text: &str) -> Vec<f64> {
        self.score_cleaned(&clean_text(text))
    }

    fn score_cleaned(&self, cleaned: &str) -> Vec<f64> {
        let q = self.space.weigh(&term_counts(cleaned));
        (0..self.matrix.rows())
            .map(|i| {
                let (indices, data) = self.matrix.row(i);
                sparse_dot(&q, indices, data).clamp(0.0, 1.0)
            })
            .collect()
    }

    /// The `top_n` most similar documents, highest score first. Empty when
    /// `text` normalizes to nothing.
    pub fn query(&self, text: &str, top_n: usize) -> Vec<(DocId, f64)> {
        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            return Vec::new();
        }
        top_k(&self.score_cleaned(&cleaned), top_n)
    }
}

impl VectorSpace {
    /// tf * idf for every in-vocabulary term, L2 normalized, sorted by term id.
    fn weigh(&self, counts: &HashMap<String, u32>) -> Vec<(TermId, f64)> {
        let mut row: Vec<(TermId, f64)> = counts
            .iter()
            .filter_map(|(term, &tf)| {
                let tid = *self.dictionary.get(term)?;
                Some((tid, tf as f64 * self.idf[tid as usize]))
            })
            .collect();
        // sorted before summing so the norm does not depend on hash order
        row.sort_unstable_by_key(|(tid, _)| *tid);
        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }
}

fn term_counts(cleaned: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for term in ngrams(cleaned) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Dot product of a sorted sparse query against one sorted matrix row.
fn sparse_dot(q: &[(TermId, f64)], indices: &[TermId], data: &[f64]) -> f64 {
    let (mut i, mut j, mut acc) = (0, 0, 0.0);
    while i < q.len() && j < indices.len() {
        match q[i].0.cmp(&indices[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                acc += q[i].1 * data[j];
                i += 1;
                j += 1;
            }
        }
    }
    acc
}

/// Partial selection of the `k` best candidates followed by a sort of just
/// those `k`. Order among equal scores is unspecified.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(DocId, f64)> {
    let k = k.max(1).min(scores.len());
    if k == 0 {
        return Vec::new();
    }
    let by_score_desc = |a: &(DocId, f64), b: &(DocId, f64)| b.1.total_cmp(&a.1);
    let mut candidates: Vec<(DocId, f64)> =
        scores.iter().enumerate().map(|(i, &s)| (i as DocId, s)).collect();
    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, by_score_desc);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(by_score_desc);
    candidates
}

use std::cmp::Ordering;

use crate::error::{AppError, AppResult};

/// Score given to pairs whose cosine similarity is undefined (a zero-norm
/// vector). It is the lowest possible similarity, so such tracks rank last.
pub const DEGENERATE_SIMILARITY: f32 = -1.0;

/// A catalog position and its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredIndex {
    pub index: usize,
    pub score: f32,
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`, clamped to `[-1, 1]`
///
/// Accumulates in `f64` so the norms of very large or very small `f32`
/// embeddings neither overflow nor vanish. Returns [`DEGENERATE_SIMILARITY`]
/// when either vector has zero norm or the result is not finite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom > 0.0 {
        let similarity = dot / denom;
        if similarity.is_finite() {
            return similarity.clamp(-1.0, 1.0) as f32;
        }
    }
    DEGENERATE_SIMILARITY
}

/// Ranks candidates by cosine similarity to `query` and keeps the top `k`
///
/// Results are ordered by descending score, ties broken by ascending
/// candidate index. Exactly `min(k, candidates)` entries are returned.
pub fn rank<'a, I>(query: &[f32], candidates: I, k: usize) -> AppResult<Vec<ScoredIndex>>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut scored = Vec::new();
    for (index, candidate) in candidates.into_iter().enumerate() {
        if candidate.len() != query.len() {
            return Err(AppError::Computation(format!(
                "embedding dimension mismatch: query has {}, catalog track {} has {}",
                query.len(),
                index,
                candidate.len()
            )));
        }
        scored.push(ScoredIndex {
            index,
            score: cosine_similarity(query, candidate),
        });
    }

    scored.sort_by(compare_ranked);
    scored.truncate(k);
    Ok(scored)
}

fn compare_ranked(a: &ScoredIndex, b: &ScoredIndex) -> Ordering {
    // cosine_similarity never yields NaN
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.index.cmp(&b.index))
}

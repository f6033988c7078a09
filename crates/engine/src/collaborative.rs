//! User-based collaborative filtering
//!
//! Scores movies for a known user from the ratings of their nearest
//! neighbors in the [`SimilarityIndex`].

use crate::matrix::InteractionMatrix;
use crate::similarity::{nearest_neighbors, SimilarityIndex};
use crate::types::{ScoreVector, UserId};
use cinematch_core::math::normalize_by_max;
use ndarray::Array1;

/// Collaborative scorer over the shared matrices
pub struct CollaborativeScorer<'a> {
    matrix: &'a InteractionMatrix,
    similarity: &'a SimilarityIndex,
    neighbors: usize,
}

impl<'a> CollaborativeScorer<'a> {
    pub fn new(
        matrix: &'a InteractionMatrix,
        similarity: &'a SimilarityIndex,
        neighbors: usize,
    ) -> Self {
        Self {
            matrix,
            similarity,
            neighbors,
        }
    }

    /// Score every movie column for `user_id`.
    ///
    /// Algorithm:
    /// 1. Take the `neighbors` most similar users, excluding the user
    /// 2. score[movie] = Σ(similarity × neighbor rating)
    /// 3. Zero movies the user already rated
    /// 4. Divide by the maximum score (all zeros if the maximum is 0)
    ///
    /// An unknown user yields an empty mapping.
    pub fn score(&self, user_id: UserId) -> ScoreVector {
        let Some(user_row) = self.matrix.user_row(user_id) else {
            tracing::debug!(user_id, "Unknown user, no collaborative scores");
            return ScoreVector::new();
        };

        let neighbors = nearest_neighbors(
            self.similarity.row(user_row),
            self.neighbors,
            Some(user_row),
        );

        let mut scores = weighted_neighbor_sum(self.matrix, &neighbors);

        let own_ratings = self.matrix.row(user_row);
        scores.zip_mut_with(&own_ratings, |score, &rating| {
            if rating > 0.0 {
                *score = 0.0;
            }
        });

        let mut scores = scores.to_vec();
        normalize_by_max(&mut scores);

        tracing::debug!(
            user_id,
            neighbor_count = neighbors.len(),
            "Computed collaborative scores"
        );

        self.matrix
            .movie_ids()
            .iter()
            .copied()
            .zip(scores)
            .collect()
    }
}

/// Σ(similarity × rating row) over the given (row, similarity) neighbors,
/// one entry per movie column.
pub(crate) fn weighted_neighbor_sum(
    matrix: &InteractionMatrix,
    neighbors: &[(usize, f32)],
) -> Array1<f32> {
    let mut scores = Array1::<f32>::zeros(matrix.num_movies());
    for &(row, similarity) in neighbors {
        scores.scaled_add(similarity, &matrix.row(row));
    }
    scores
}

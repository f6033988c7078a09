//! Cold start handling
//!
//! Recommends movies for someone with no row in the interaction matrix,
//! based on a handful of manually entered (title, rating) pairs.

use crate::collaborative::weighted_neighbor_sum;
use crate::dataset::Dataset;
use crate::matrix::InteractionMatrix;
use crate::similarity::{cosine, nearest_neighbors};
use crate::types::{ManualRatings, MovieId, ScoreVector};
use ndarray::Array1;
use std::collections::HashSet;

/// Cold-start scorer over the shared matrices
pub struct ColdStartScorer<'a> {
    dataset: &'a Dataset,
    matrix: &'a InteractionMatrix,
    neighbors: usize,
}

impl<'a> ColdStartScorer<'a> {
    pub fn new(dataset: &'a Dataset, matrix: &'a InteractionMatrix, neighbors: usize) -> Self {
        Self {
            dataset,
            matrix,
            neighbors,
        }
    }

    /// Score every unrated movie column for an ad-hoc user.
    ///
    /// Algorithm:
    /// 1. Build a temporary rating vector over the matrix columns
    /// 2. Cosine similarity of that vector against every known user
    /// 3. Take the `neighbors` most similar users (the temporary user is not
    ///    part of the index, so nobody is excluded)
    /// 4. score[movie] = Σ(similarity × neighbor rating)
    /// 5. Drop every movie whose title appears in the manual ratings
    ///
    /// Titles missing from the catalog are skipped. Empty input yields an
    /// empty mapping.
    pub fn score(&self, manual_ratings: &ManualRatings) -> ScoreVector {
        if manual_ratings.is_empty() {
            return ScoreVector::new();
        }

        let (preferences, rated) = self.preference_vector(manual_ratings);

        let similarities: Array1<f32> = self
            .matrix
            .ratings()
            .rows()
            .into_iter()
            .map(|row| cosine(row, preferences.view()))
            .collect();

        let neighbors = nearest_neighbors(similarities.view(), self.neighbors, None);
        let scores = weighted_neighbor_sum(self.matrix, &neighbors);

        tracing::debug!(
            rated_titles = manual_ratings.len(),
            resolved_titles = rated.len(),
            neighbor_count = neighbors.len(),
            "Computed cold-start scores"
        );

        self.matrix
            .movie_ids()
            .iter()
            .copied()
            .zip(scores.iter().copied())
            .filter(|(movie_id, _)| !rated.contains(movie_id))
            .collect()
    }

    /// Top `n` titles for an ad-hoc user, best first.
    ///
    /// Ties are ordered by movie id ascending. Movie ids that no longer
    /// resolve to a catalog title are skipped after truncation, so the list
    /// may be shorter than `n`.
    pub fn recommend(&self, manual_ratings: &ManualRatings, n: usize) -> Vec<String> {
        if manual_ratings.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(MovieId, f32)> = self.score(manual_ratings).into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);

        ranked
            .into_iter()
            .filter_map(|(movie_id, _)| self.dataset.title_of(movie_id).map(str::to_string))
            .collect()
    }

    /// Temporary rating vector plus the ids of every resolvable rated title
    fn preference_vector(
        &self,
        manual_ratings: &ManualRatings,
    ) -> (Array1<f32>, HashSet<MovieId>) {
        let mut preferences = Array1::<f32>::zeros(self.matrix.num_movies());
        let mut rated = HashSet::with_capacity(manual_ratings.len());

        for (title, &rating) in manual_ratings {
            let Some(movie) = self.dataset.movie_by_title(title) else {
                tracing::debug!(title = %title, "Skipping rating for title not in catalog");
                continue;
            };

            // every entry sharing the title is excluded, only the first one
            // carries the rating
            rated.extend(self.dataset.movie_ids_by_title(title).iter().copied());
            if let Some(col) = self.matrix.movie_column(movie.id) {
                preferences[col] = rating;
            }
        }

        (preferences, rated)
    }
}

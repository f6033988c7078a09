//! Dataset analytics
//!
//! Summary numbers for dashboards: sizes, rating distribution, genre
//! popularity, most-rated movies and a corner of the similarity matrix.

use crate::dataset::Dataset;
use crate::matrix::InteractionMatrix;
use crate::similarity::SimilarityIndex;
use crate::types::{Genre, MovieId, UserId};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_TRENDING_LIMIT: usize = 10;
pub const DEFAULT_SIMILARITY_SAMPLE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBucket {
    /// Whole-star rating value
    pub rating: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingMovie {
    pub movie_id: MovieId,
    pub title: String,
    pub rating_count: usize,
}

/// Top-left block of the similarity matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilaritySample {
    pub user_ids: Vec<UserId>,
    /// Row-major, `user_ids.len()` × `user_ids.len()`
    pub values: Vec<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_users: usize,
    pub total_movies: usize,
    pub total_ratings: usize,
    pub rating_distribution: Vec<RatingBucket>,
    pub genre_popularity: Vec<GenreCount>,
    pub trending: Vec<TrendingMovie>,
    pub similarity_sample: SimilaritySample,
}

impl DatasetStats {
    pub fn compute(
        dataset: &Dataset,
        matrix: &InteractionMatrix,
        similarity: &SimilarityIndex,
        trending_limit: usize,
        sample_size: usize,
    ) -> Self {
        Self {
            total_users: matrix.num_users(),
            total_movies: dataset.movies().len(),
            total_ratings: matrix.rating_count(),
            rating_distribution: rating_distribution(matrix),
            genre_popularity: genre_popularity(dataset),
            trending: most_rated(dataset, matrix, trending_limit),
            similarity_sample: similarity_sample(matrix, similarity, sample_size),
        }
    }
}

/// Count of non-zero matrix cells per whole-star rating, ascending
pub fn rating_distribution(matrix: &InteractionMatrix) -> Vec<RatingBucket> {
    let mut buckets: BTreeMap<u32, usize> = BTreeMap::new();
    for &rating in matrix.ratings().iter().filter(|&&r| r > 0.0) {
        *buckets.entry(rating.round() as u32).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(rating, count)| RatingBucket { rating, count })
        .collect()
}

/// Number of catalog movies carrying each genre, in vocabulary order
pub fn genre_popularity(dataset: &Dataset) -> Vec<GenreCount> {
    Genre::ALL
        .iter()
        .map(|&genre| GenreCount {
            genre: genre.name().to_string(),
            count: dataset
                .movies()
                .iter()
                .filter(|m| m.genres.contains(genre))
                .count(),
        })
        .collect()
}

/// Movies with the most ratings, ties by movie id ascending.
///
/// Matrix columns without a catalog entry are skipped.
pub fn most_rated(dataset: &Dataset, matrix: &InteractionMatrix, k: usize) -> Vec<TrendingMovie> {
    let mut counts: Vec<(MovieId, usize)> = matrix
        .ratings()
        .columns()
        .into_iter()
        .zip(matrix.movie_ids().iter().copied())
        .map(|(column, movie_id)| (movie_id, column.iter().filter(|&&r| r != 0.0).count()))
        .collect();

    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    counts
        .into_iter()
        .filter_map(|(movie_id, rating_count)| {
            dataset.title_of(movie_id).map(|title| TrendingMovie {
                movie_id,
                title: title.to_string(),
                rating_count,
            })
        })
        .take(k)
        .collect()
}

/// Top-left `k` × `k` block of the similarity matrix
pub fn similarity_sample(
    matrix: &InteractionMatrix,
    similarity: &SimilarityIndex,
    k: usize,
) -> SimilaritySample {
    let size = k.min(similarity.num_users());

    SimilaritySample {
        user_ids: matrix.user_ids()[..size].to_vec(),
        values: (0..size)
            .map(|i| (0..size).map(|j| similarity.get(i, j)).collect())
            .collect(),
    }
}

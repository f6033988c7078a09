//! CineMatch Recommendation Engine
//!
//! Hybrid movie recommender over a static ratings dataset: user-based
//! collaborative filtering, genre-preference content scoring and a
//! cold-start path for people who only supply a few manual ratings.
//!
//! The heavy structures (interaction matrix and user similarity index) are
//! built once in [`RecommenderEngine::new`] and are read-only afterwards, so
//! one engine can be shared across threads behind an `Arc`.

pub mod analytics;
pub mod cold_start;
pub mod collaborative;
pub mod content_based;
pub mod dataset;
pub mod loader;
pub mod matrix;
pub mod recommendation;
pub mod server;
pub mod similarity;
pub mod types;

// Re-export key types
pub use analytics::{DatasetStats, DEFAULT_SIMILARITY_SAMPLE, DEFAULT_TRENDING_LIMIT};
pub use cold_start::ColdStartScorer;
pub use collaborative::CollaborativeScorer;
pub use content_based::ContentScorer;
pub use dataset::Dataset;
pub use matrix::InteractionMatrix;
pub use recommendation::{display_score, BlendWeights, HybridBlender};
pub use similarity::SimilarityIndex;
pub use types::*;

use cinematch_core::{parse_env_var, CineMatchError, ConfigLoader};
use std::time::Instant;
use tracing::info;

/// Largest result length a caller may ask for
pub const MAX_LIMIT: usize = 100;

/// Engine configuration
///
/// # Environment Variables
///
/// - `CINEMATCH_NEIGHBORS` (optional): neighborhood size (default: 5)
/// - `CINEMATCH_COLLABORATIVE_WEIGHT` (optional): collaborative blend weight (default: 0.6)
/// - `CINEMATCH_CONTENT_WEIGHT` (optional): content blend weight (default: 0.4)
/// - `CINEMATCH_DEFAULT_LIMIT` (optional): result length when none is given, 1..=100 (default: 10)
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of nearest neighbors consulted (default: 5)
    pub neighbors: usize,
    /// Weight of the collaborative channel (default: 0.6)
    pub collaborative_weight: f32,
    /// Weight of the content channel (default: 0.4)
    pub content_weight: f32,
    /// Result length used when a caller gives none (default: 10)
    pub default_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let weights = BlendWeights::default();
        Self {
            neighbors: 5,
            collaborative_weight: weights.collaborative,
            content_weight: weights.content,
            default_limit: 10,
        }
    }
}

impl EngineConfig {
    pub fn blend_weights(&self) -> BlendWeights {
        BlendWeights {
            collaborative: self.collaborative_weight,
            content: self.content_weight,
        }
    }
}

impl ConfigLoader for EngineConfig {
    fn from_env() -> Result<Self, CineMatchError> {
        let defaults = EngineConfig::default();

        Ok(Self {
            neighbors: parse_env_var("CINEMATCH_NEIGHBORS", defaults.neighbors)?,
            collaborative_weight: parse_env_var(
                "CINEMATCH_COLLABORATIVE_WEIGHT",
                defaults.collaborative_weight,
            )?,
            content_weight: parse_env_var("CINEMATCH_CONTENT_WEIGHT", defaults.content_weight)?,
            default_limit: parse_env_var("CINEMATCH_DEFAULT_LIMIT", defaults.default_limit)?,
        })
    }

    fn validate(&self) -> Result<(), CineMatchError> {
        if self.neighbors == 0 {
            return Err(CineMatchError::configuration(
                "neighbors must be greater than 0",
                "CINEMATCH_NEIGHBORS",
            ));
        }

        for (weight, key) in [
            (self.collaborative_weight, "CINEMATCH_COLLABORATIVE_WEIGHT"),
            (self.content_weight, "CINEMATCH_CONTENT_WEIGHT"),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CineMatchError::configuration(
                    format!("blend weight must be finite and non-negative, got {}", weight),
                    key,
                ));
            }
        }

        if self.default_limit == 0 || self.default_limit > MAX_LIMIT {
            return Err(CineMatchError::configuration(
                format!(
                    "default_limit must be between 1 and {}, got {}",
                    MAX_LIMIT, self.default_limit
                ),
                "CINEMATCH_DEFAULT_LIMIT",
            ));
        }

        Ok(())
    }
}

/// Recommender over one immutable dataset
pub struct RecommenderEngine {
    config: EngineConfig,
    dataset: Dataset,
    matrix: InteractionMatrix,
    similarity: SimilarityIndex,
}

impl RecommenderEngine {
    /// Build the interaction matrix and similarity index for `dataset`
    pub fn new(dataset: Dataset, config: EngineConfig) -> Self {
        let started = Instant::now();

        let matrix = InteractionMatrix::from_events(dataset.ratings());
        let similarity = SimilarityIndex::build(&matrix);

        info!(
            users = matrix.num_users(),
            movies = dataset.movies().len(),
            rated_movies = matrix.num_movies(),
            ratings = matrix.rating_count(),
            neighbors = config.neighbors,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recommender engine ready"
        );

        Self {
            config,
            dataset,
            matrix,
            similarity,
        }
    }

    pub fn with_default_config(dataset: Dataset) -> Self {
        Self::new(dataset, EngineConfig::default())
    }

    /// Top `n` movies for a known (or unknown) user and a genre profile
    pub fn hybrid_recommend(
        &self,
        user_id: UserId,
        genre_weights: &GenreWeights,
        n: usize,
    ) -> Vec<HybridRecommendation> {
        HybridBlender::new(
            &self.dataset,
            self.collaborative(),
            ContentScorer::new(&self.dataset),
            self.config.blend_weights(),
        )
        .recommend(user_id, genre_weights, n)
    }

    /// Top `n` titles for someone described only by manual ratings
    pub fn recommend_from_manual_ratings(
        &self,
        manual_ratings: &ManualRatings,
        n: usize,
    ) -> Vec<String> {
        ColdStartScorer::new(&self.dataset, &self.matrix, self.config.neighbors)
            .recommend(manual_ratings, n)
    }

    /// Normalized collaborative scores, empty for an unknown user
    pub fn collaborative_scores(&self, user_id: UserId) -> ScoreVector {
        self.collaborative().score(user_id)
    }

    /// Content scores for every catalog movie
    pub fn content_scores(&self, genre_weights: &GenreWeights) -> ScoreVector {
        ContentScorer::new(&self.dataset).score(genre_weights)
    }

    /// Dataset statistics with the default trending and sample sizes
    pub fn stats(&self) -> DatasetStats {
        DatasetStats::compute(
            &self.dataset,
            &self.matrix,
            &self.similarity,
            DEFAULT_TRENDING_LIMIT,
            DEFAULT_SIMILARITY_SAMPLE,
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn similarity(&self) -> &SimilarityIndex {
        &self.similarity
    }

    fn collaborative(&self) -> CollaborativeScorer<'_> {
        CollaborativeScorer::new(&self.matrix, &self.similarity, self.config.neighbors)
    }
}

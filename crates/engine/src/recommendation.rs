//! Hybrid recommendation blending
//!
//! Combines collaborative and content-based scores with a fixed linear blend
//! and turns the result into a ranked, bounded, display-ready list.

use crate::collaborative::CollaborativeScorer;
use crate::content_based::ContentScorer;
use crate::dataset::Dataset;
use crate::types::{GenreWeights, HybridRecommendation, MovieId, UserId};
use cinematch_core::math::round_to;

/// Upper bound of the display scale
const MAX_DISPLAY_SCORE: f32 = 10.0;

/// Linear blend weights for the two score channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub collaborative: f32,
    pub content: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            collaborative: 0.6,
            content: 0.4,
        }
    }
}

impl BlendWeights {
    pub fn blend(&self, collaborative: f32, content: f32) -> f32 {
        self.collaborative * collaborative + self.content * content
    }
}

/// Blends collaborative and content scores into one ranking
pub struct HybridBlender<'a> {
    dataset: &'a Dataset,
    collaborative: CollaborativeScorer<'a>,
    content: ContentScorer<'a>,
    weights: BlendWeights,
}

impl<'a> HybridBlender<'a> {
    pub fn new(
        dataset: &'a Dataset,
        collaborative: CollaborativeScorer<'a>,
        content: ContentScorer<'a>,
        weights: BlendWeights,
    ) -> Self {
        Self {
            dataset,
            collaborative,
            content,
            weights,
        }
    }

    /// Top `n` catalog movies for a user and genre profile.
    ///
    /// Steps:
    /// 1. Collaborative scores for the user (empty for an unknown user)
    /// 2. Content scores for the genre profile
    /// 3. final = w_c × collaborative + w_g × content for every catalog movie,
    ///    missing channel entries counting as 0
    /// 4. Stable sort by final descending, so ties keep catalog order
    /// 5. Truncate to `n` and rescale to the 0-10 display range
    pub fn recommend(
        &self,
        user_id: UserId,
        genre_weights: &GenreWeights,
        n: usize,
    ) -> Vec<HybridRecommendation> {
        let collaborative = self.collaborative.score(user_id);
        let content = self.content.score(genre_weights);

        let mut blended: Vec<(MovieId, f32)> = self
            .dataset
            .movies()
            .iter()
            .map(|movie| {
                let c = collaborative.get(&movie.id).copied().unwrap_or(0.0);
                let g = content.get(&movie.id).copied().unwrap_or(0.0);
                (movie.id, self.weights.blend(c, g))
            })
            .collect();

        // sort_by is stable: equal scores stay in catalog order
        blended.sort_by(|a, b| b.1.total_cmp(&a.1));
        blended.truncate(n);

        tracing::debug!(
            user_id,
            known_user = !collaborative.is_empty(),
            genre_count = genre_weights.len(),
            results = blended.len(),
            "Blended hybrid recommendations"
        );

        blended
            .into_iter()
            .filter_map(|(movie_id, score)| {
                let movie = self.dataset.movie(movie_id)?;
                Some(HybridRecommendation {
                    title: movie.title.clone(),
                    score: display_score(score),
                    genres: movie.genres.names(),
                })
            })
            .collect()
    }
}

/// Rescale a blended score onto 0-10, cap at 10 and round to one decimal.
///
/// Exact halves round away from zero (1.25 -> 1.3), not to the even digit.
pub fn display_score(score: f32) -> f32 {
    round_to((score * MAX_DISPLAY_SCORE).min(MAX_DISPLAY_SCORE), 1)
}

//! Content-based scoring from declared genre preferences

use crate::dataset::Dataset;
use crate::types::{Genre, GenreWeights, ScoreVector, GENRE_COUNT};

/// Sliders run 0..=100; scores are reported on the 0..=1 scale per genre.
const WEIGHT_SCALE: f32 = 100.0;

/// Genre-preference scorer over the catalog
pub struct ContentScorer<'a> {
    dataset: &'a Dataset,
}

impl<'a> ContentScorer<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Score every catalog movie against a genre-weight profile.
    ///
    /// score[movie] = Σ weight(genre) / 100 over the genres flagged on the
    /// movie. Genres missing from the profile, and profile keys outside the
    /// vocabulary, contribute nothing. The result is not clamped: a movie
    /// with several heavily weighted genres can exceed 1.0.
    pub fn score(&self, genre_weights: &GenreWeights) -> ScoreVector {
        let weights = resolve_weights(genre_weights);

        self.dataset
            .movies()
            .iter()
            .map(|movie| {
                let total: f32 = movie.genres.iter().map(|g| weights[g.index()]).sum();
                (movie.id, total / WEIGHT_SCALE)
            })
            .collect()
    }
}

/// Map a name-keyed profile onto the vocabulary, dropping unknown names
fn resolve_weights(genre_weights: &GenreWeights) -> [f32; GENRE_COUNT] {
    let mut weights = [0.0f32; GENRE_COUNT];
    for (name, &weight) in genre_weights {
        match Genre::from_name(name) {
            Some(genre) => weights[genre.index()] = weight,
            None => tracing::debug!(genre = %name, "Ignoring weight for unknown genre"),
        }
    }
    weights
}

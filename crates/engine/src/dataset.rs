//! Movie catalog and raw rating events
//!
//! Assembled once at startup and immutable afterwards.

use crate::types::{Movie, MovieId, RatingEvent};
use std::collections::HashMap;

/// Catalog plus rating events
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    movies: Vec<Movie>,
    ratings: Vec<RatingEvent>,
    movie_index: HashMap<MovieId, usize>,
    title_index: HashMap<String, Vec<MovieId>>,
}

impl Dataset {
    /// Build a dataset, preserving catalog order.
    ///
    /// Titles are not guaranteed unique; title lookup resolves to the first
    /// catalog entry carrying the title, while [`Dataset::movie_ids_by_title`]
    /// lists all of them. A repeated movie id keeps its first entry.
    pub fn new(movies: Vec<Movie>, ratings: Vec<RatingEvent>) -> Self {
        let mut movie_index = HashMap::with_capacity(movies.len());
        let mut title_index = HashMap::with_capacity(movies.len());
        let mut catalog = Vec::with_capacity(movies.len());

        for movie in movies {
            if movie_index.contains_key(&movie.id) {
                tracing::warn!(movie_id = movie.id, "Duplicate movie id in catalog, keeping first");
                continue;
            }
            movie_index.insert(movie.id, catalog.len());
            title_index
                .entry(movie.title.clone())
                .or_insert_with(Vec::new)
                .push(movie.id);
            catalog.push(movie);
        }

        Self {
            movies: catalog,
            ratings,
            movie_index,
            title_index,
        }
    }

    /// Catalog in source order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn ratings(&self) -> &[RatingEvent] {
        &self.ratings
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movie_index.get(&id).map(|&idx| &self.movies[idx])
    }

    pub fn movie_by_title(&self, title: &str) -> Option<&Movie> {
        self.movie_ids_by_title(title)
            .first()
            .and_then(|&id| self.movie(id))
    }

    /// Every catalog id carrying `title`, in catalog order
    pub fn movie_ids_by_title(&self, title: &str) -> &[MovieId] {
        self.title_index
            .get(title)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn title_of(&self, id: MovieId) -> Option<&str> {
        self.movie(id).map(|m| m.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Genre;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                Movie::new(10, "Heat (1995)", &[Genre::Action, Genre::Crime]),
                Movie::new(3, "Babe (1995)", &[Genre::Children]),
                Movie::new(7, "Heat (1995)", &[Genre::Drama]),
            ],
            vec![RatingEvent::new(1, 10, 4.0)],
        )
    }

    #[test]
    fn test_catalog_order_preserved() {
        let dataset = sample();
        let ids: Vec<_> = dataset.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10, 3, 7]);
    }

    #[test]
    fn test_movie_lookup() {
        let dataset = sample();
        assert_eq!(dataset.title_of(3), Some("Babe (1995)"));
        assert!(dataset.movie(99).is_none());
    }

    #[test]
    fn test_duplicate_title_resolves_to_first() {
        let dataset = sample();
        assert_eq!(dataset.movie_by_title("Heat (1995)").map(|m| m.id), Some(10));
        assert!(dataset.movie_by_title("Missing").is_none());
    }

    #[test]
    fn test_movie_ids_by_title_lists_every_entry() {
        let dataset = sample();
        assert_eq!(dataset.movie_ids_by_title("Heat (1995)"), &[10, 7]);
        assert_eq!(dataset.movie_ids_by_title("Babe (1995)"), &[3]);
        assert!(dataset.movie_ids_by_title("Missing").is_empty());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let dataset = Dataset::new(
            vec![Movie::new(1, "First", &[]), Movie::new(1, "Second", &[])],
            Vec::new(),
        );
        assert_eq!(dataset.movies().len(), 1);
        assert_eq!(dataset.title_of(1), Some("First"));
        assert!(dataset.movie_by_title("Second").is_none());
    }
}

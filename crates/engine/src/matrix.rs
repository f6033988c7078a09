//! Dense user-item interaction matrix
//!
//! Rows are users ordered by id ascending, columns are movies ordered by id
//! ascending. A cell holds the user's rating, or 0.0 when there is none.

use crate::types::{MovieId, RatingEvent, UserId};
use ndarray::{Array2, ArrayView1};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    /// [num_users x num_movies]
    ratings: Array2<f32>,
    user_ids: Vec<UserId>,
    movie_ids: Vec<MovieId>,
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,
}

impl InteractionMatrix {
    /// Build the matrix from rating events.
    ///
    /// Every user and movie that appears in any event gets exactly one row or
    /// column. A repeated (user, movie) pair keeps the last event's rating.
    pub fn from_events(events: &[RatingEvent]) -> Self {
        let user_ids: Vec<UserId> = events
            .iter()
            .map(|e| e.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let movie_ids: Vec<MovieId> = events
            .iter()
            .map(|e| e.movie_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let movie_index: HashMap<MovieId, usize> =
            movie_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let mut ratings = Array2::<f32>::zeros((user_ids.len(), movie_ids.len()));
        for event in events {
            let row = user_index[&event.user_id];
            let col = movie_index[&event.movie_id];
            ratings[[row, col]] = event.rating;
        }

        Self {
            ratings,
            user_ids,
            movie_ids,
            user_index,
            movie_index,
        }
    }

    pub fn num_users(&self) -> usize {
        self.user_ids.len()
    }

    pub fn num_movies(&self) -> usize {
        self.movie_ids.len()
    }

    /// User ids in row order
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Movie ids in column order
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    pub fn user_row(&self, user_id: UserId) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    pub fn movie_column(&self, movie_id: MovieId) -> Option<usize> {
        self.movie_index.get(&movie_id).copied()
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_index.contains_key(&user_id)
    }

    /// Full rating table
    pub fn ratings(&self) -> &Array2<f32> {
        &self.ratings
    }

    /// One user's ratings across all movie columns
    pub fn row(&self, row: usize) -> ArrayView1<'_, f32> {
        self.ratings.row(row)
    }

    /// Rating for a (user, movie) pair, 0.0 when either is unknown
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> f32 {
        match (self.user_row(user_id), self.movie_column(movie_id)) {
            (Some(row), Some(col)) => self.ratings[[row, col]],
            _ => 0.0,
        }
    }

    /// Number of non-zero cells
    pub fn rating_count(&self) -> usize {
        self.ratings.iter().filter(|&&r| r != 0.0).count()
    }
}

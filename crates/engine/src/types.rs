//! Domain types shared by the scoring components

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type UserId = u32;
pub type MovieId = u32;

/// Genre name -> weight in 0..=100, supplied per query
pub type GenreWeights = HashMap<String, f32>;

/// Movie title -> rating in 1..=10, supplied per cold-start query
pub type ManualRatings = HashMap<String, f32>;

/// Intermediate per-movie scores produced by a scorer
pub type ScoreVector = HashMap<MovieId, f32>;

/// Number of genres in the catalog vocabulary
pub const GENRE_COUNT: usize = 19;

/// Closed genre vocabulary, in the column order of the catalog source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "unknown")]
    Unknown,
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    #[serde(rename = "Film-Noir")]
    FilmNoir,
    Horror,
    Musical,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub const ALL: [Genre; GENRE_COUNT] = [
        Genre::Unknown,
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Children,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::Horror,
        Genre::Musical,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// Name as it appears in the catalog header and in genre-weight profiles
    pub fn name(self) -> &'static str {
        match self {
            Genre::Unknown => "unknown",
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Children => "Children",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::FilmNoir => "Film-Noir",
            Genre::Horror => "Horror",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Exact-name lookup; names are case sensitive like the catalog columns
    pub fn from_name(name: &str) -> Option<Genre> {
        Genre::ALL.iter().copied().find(|g| g.name() == name)
    }

    /// Position in the vocabulary
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-order set of binary genre flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenreFlags([bool; GENRE_COUNT]);

impl GenreFlags {
    pub fn from_flags(flags: [bool; GENRE_COUNT]) -> Self {
        Self(flags)
    }

    pub fn from_genres(genres: &[Genre]) -> Self {
        let mut flags = [false; GENRE_COUNT];
        for genre in genres {
            flags[genre.index()] = true;
        }
        Self(flags)
    }

    pub fn contains(&self, genre: Genre) -> bool {
        self.0[genre.index()]
    }

    /// Flagged genres in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = Genre> + '_ {
        Genre::ALL.iter().copied().filter(|g| self.contains(*g))
    }

    /// Flagged genre names in vocabulary order
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|g| g.name().to_string()).collect()
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genres: GenreFlags,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>, genres: &[Genre]) -> Self {
        Self {
            id,
            title: title.into(),
            genres: GenreFlags::from_genres(genres),
        }
    }
}

/// Raw rating event from the ratings source
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEvent {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating on the source 1-5 scale
    pub rating: f32,
    /// Carried from the source, not used for scoring
    pub timestamp: Option<DateTime<Utc>>,
}

impl RatingEvent {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: f32) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
            timestamp: None,
        }
    }
}

/// One entry of a hybrid recommendation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridRecommendation {
    pub title: String,
    /// Blended score on the 0-10 display scale, one decimal place
    pub score: f32,
    pub genres: Vec<String>,
}

//! MovieLens-100k loader
//!
//! Reads the two tabular sources of the classic dataset:
//!
//! - `u.data`: tab-separated `user id | item id | rating | timestamp`
//! - `u.item`: pipe-separated, Latin-1 encoded `movie id | title | release
//!   date | video release date | IMDb URL | 19 genre flags`
//!
//! Unlike the scoring core, loading fails loudly: a malformed line is a
//! `DataError` naming the file and line.

use crate::dataset::Dataset;
use crate::types::{GenreFlags, Movie, RatingEvent, GENRE_COUNT};
use chrono::DateTime;
use cinematch_core::{CineMatchError, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

pub const RATINGS_FILE: &str = "u.data";
pub const MOVIES_FILE: &str = "u.item";

/// Columns before the genre flags in `u.item`
const MOVIE_LEADING_FIELDS: usize = 5;

impl Dataset {
    /// Load `u.data` and `u.item` from a MovieLens directory
    pub fn load_movielens(dir: impl AsRef<Path>) -> Result<Dataset> {
        let dir = dir.as_ref();
        let started = Instant::now();

        let movie_bytes = fs::read(dir.join(MOVIES_FILE))?;
        let movies = parse_movies(&movie_bytes, MOVIES_FILE)?;

        let rating_text = fs::read_to_string(dir.join(RATINGS_FILE))?;
        let ratings = parse_ratings(&rating_text, RATINGS_FILE)?;

        tracing::info!(
            dir = %dir.display(),
            movies = movies.len(),
            ratings = ratings.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded MovieLens dataset"
        );

        Ok(Dataset::new(movies, ratings))
    }
}

/// Parse whitespace-separated rating events
pub fn parse_ratings(text: &str, source_name: &str) -> Result<Vec<RatingEvent>> {
    let mut events = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(CineMatchError::data(
                format!("expected 4 fields, found {}", fields.len()),
                source_name,
                line_no,
            ));
        }

        let user_id = parse_field(fields[0], "user id", source_name, line_no)?;
        let movie_id = parse_field(fields[1], "movie id", source_name, line_no)?;
        let rating: f32 = parse_field(fields[2], "rating", source_name, line_no)?;
        let seconds: i64 = parse_field(fields[3], "timestamp", source_name, line_no)?;

        if !rating.is_finite() || rating <= 0.0 {
            return Err(CineMatchError::data(
                format!("rating must be positive, found {}", fields[2]),
                source_name,
                line_no,
            ));
        }

        events.push(RatingEvent {
            user_id,
            movie_id,
            rating,
            timestamp: DateTime::from_timestamp(seconds, 0),
        });
    }

    Ok(events)
}

/// Parse the Latin-1 encoded movie catalog
pub fn parse_movies(bytes: &[u8], source_name: &str) -> Result<Vec<Movie>> {
    let text = decode_latin1(bytes);
    let mut movies = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < MOVIE_LEADING_FIELDS + GENRE_COUNT {
            return Err(CineMatchError::data(
                format!(
                    "expected {} fields, found {}",
                    MOVIE_LEADING_FIELDS + GENRE_COUNT,
                    fields.len()
                ),
                source_name,
                line_no,
            ));
        }

        let id = parse_field(fields[0], "movie id", source_name, line_no)?;

        let mut flags = [false; GENRE_COUNT];
        for (i, raw) in fields[MOVIE_LEADING_FIELDS..MOVIE_LEADING_FIELDS + GENRE_COUNT]
            .iter()
            .enumerate()
        {
            flags[i] = match raw.trim() {
                "1" => true,
                "0" => false,
                other => {
                    return Err(CineMatchError::data(
                        format!("genre flag must be 0 or 1, found '{}'", other),
                        source_name,
                        line_no,
                    ))
                }
            };
        }

        movies.push(Movie {
            id,
            title: fields[1].to_string(),
            genres: GenreFlags::from_flags(flags),
        });
    }

    Ok(movies)
}

/// Latin-1 maps every byte to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn parse_field<T>(raw: &str, name: &str, source_name: &str, line_no: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        CineMatchError::data(format!("invalid {} '{}': {}", name, raw, e), source_name, line_no)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Genre;

    const ITEM_LINE: &str = "1|Toy Story (1995)|01-Jan-1995||http://us.imdb.com/M/title-exact?Toy%20Story%20(1995)|0|0|0|1|1|1|0|0|0|0|0|0|0|0|0|0|0|0|0";

    #[test]
    fn test_parse_ratings() {
        let text = "196\t242\t3\t881250949\n186\t302\t3\t891717742\n\n";
        let events = parse_ratings(text, RATINGS_FILE).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].user_id, 196);
        assert_eq!(events[0].movie_id, 242);
        assert_eq!(events[0].rating, 3.0);
        assert_eq!(
            events[0].timestamp.map(|t| t.timestamp()),
            Some(881250949)
        );
    }

    #[test]
    fn test_parse_ratings_reports_line() {
        let text = "1\t1\t5\t0\n1\t2\tfive\t0\n";
        match parse_ratings(text, RATINGS_FILE).unwrap_err() {
            CineMatchError::DataError {
                source_name, line, ..
            } => {
                assert_eq!(source_name, RATINGS_FILE);
                assert_eq!(line, 2);
            }
            other => panic!("Expected DataError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ratings_rejects_zero_rating() {
        assert!(parse_ratings("1\t1\t0\t0\n", RATINGS_FILE).is_err());
    }

    #[test]
    fn test_parse_ratings_wrong_field_count() {
        assert!(parse_ratings("1\t1\t5\n", RATINGS_FILE).is_err());
    }

    #[test]
    fn test_parse_movies() {
        let movies = parse_movies(ITEM_LINE.as_bytes(), MOVIES_FILE).unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[0].title, "Toy Story (1995)");
        assert_eq!(
            movies[0].genres.iter().collect::<Vec<_>>(),
            vec![Genre::Animation, Genre::Children, Genre::Comedy]
        );
    }

    #[test]
    fn test_parse_movies_latin1_title() {
        // "Belle époque (1992)" with é as the single byte 0xE9
        let mut line = b"9|Belle \xe9poque (1992)|||".to_vec();
        line.extend_from_slice(&b"|0".repeat(GENRE_COUNT));

        let movies = parse_movies(&line, MOVIES_FILE).unwrap();
        assert_eq!(movies[0].title, "Belle \u{e9}poque (1992)");
    }

    #[test]
    fn test_parse_movies_short_line() {
        let err = parse_movies(b"1|Short|x", MOVIES_FILE).unwrap_err();
        assert!(matches!(err, CineMatchError::DataError { line: 1, .. }));
    }

    #[test]
    fn test_parse_movies_bad_flag() {
        let line = ITEM_LINE.replacen("|1|1|1|", "|1|2|1|", 1);
        assert!(parse_movies(line.as_bytes(), MOVIES_FILE).is_err());
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"caf\xe9"), "caf\u{e9}");
        assert_eq!(decode_latin1(b"plain"), "plain");
    }
}

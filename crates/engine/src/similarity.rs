//! User-user cosine similarity index
//!
//! Dense and symmetric, aligned with the rows of the [`InteractionMatrix`]
//! it was built from. The diagonal is fixed at 1.0 for every user, including
//! one whose rating row is all zeros.

use crate::matrix::InteractionMatrix;
use cinematch_core::math::cosine_from_parts;
use ndarray::{Array1, Array2, ArrayView1, Zip};

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    /// [num_users x num_users]
    similarities: Array2<f32>,
}

impl SimilarityIndex {
    /// Compute pairwise cosine similarity over all matrix rows.
    ///
    /// A pair involving a zero-norm row has similarity 0.0.
    pub fn build(matrix: &InteractionMatrix) -> Self {
        let ratings = matrix.ratings();

        let norms: Array1<f32> = ratings.rows().into_iter().map(l2_norm).collect();

        let mut similarities = ratings.dot(&ratings.t());

        Zip::indexed(&mut similarities).par_for_each(|(i, j), value| {
            *value = if i == j {
                1.0
            } else {
                cosine_from_parts(*value, norms[i], norms[j])
            };
        });

        Self { similarities }
    }

    pub fn num_users(&self) -> usize {
        self.similarities.nrows()
    }

    /// Similarity between two matrix rows
    pub fn get(&self, row_a: usize, row_b: usize) -> f32 {
        self.similarities[[row_a, row_b]]
    }

    /// Similarities of one user to every user, in row order
    pub fn row(&self, row: usize) -> ArrayView1<'_, f32> {
        self.similarities.row(row)
    }

    pub fn matrix(&self) -> &Array2<f32> {
        &self.similarities
    }
}

/// Euclidean norm of one vector
pub fn l2_norm(v: ArrayView1<'_, f32>) -> f32 {
    v.dot(&v).sqrt()
}

/// Cosine similarity of two equal-length vectors, 0.0 when either is zero
pub fn cosine(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    cosine_from_parts(a.dot(&b), l2_norm(a), l2_norm(b))
}

/// Pick the `k` most similar rows.
///
/// Ranks by similarity descending; ties go to the lower row index, which is
/// the lower user id. `exclude` drops one row (the querying user) before
/// ranking.
pub fn nearest_neighbors(
    similarities: ArrayView1<'_, f32>,
    k: usize,
    exclude: Option<usize>,
) -> Vec<(usize, f32)> {
    let mut candidates: Vec<(usize, f32)> = similarities
        .iter()
        .copied()
        .enumerate()
        .filter(|(row, _)| Some(*row) != exclude)
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    candidates.truncate(k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatingEvent;
    use ndarray::array;

    fn three_users() -> InteractionMatrix {
        // rows: [5,0,0], [0,5,0], [4,0,5]
        InteractionMatrix::from_events(&[
            RatingEvent::new(1, 1, 5.0),
            RatingEvent::new(2, 2, 5.0),
            RatingEvent::new(3, 1, 4.0),
            RatingEvent::new(3, 3, 5.0),
        ])
    }

    #[test]
    fn test_diagonal_and_symmetry() {
        let index = SimilarityIndex::build(&three_users());
        assert_eq!(index.num_users(), 3);

        for i in 0..3 {
            assert_eq!(index.get(i, i), 1.0);
            for j in 0..3 {
                assert!((index.get(i, j) - index.get(j, i)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_cosine_values() {
        let index = SimilarityIndex::build(&three_users());
        let expected = 4.0 / 41f32.sqrt();

        assert!(index.get(0, 1).abs() < 1e-6);
        assert!((index.get(0, 2) - expected).abs() < 1e-6);
        assert!(index.get(1, 2).abs() < 1e-6);
    }

    #[test]
    fn test_zero_row_similar_to_nobody() {
        let matrix = InteractionMatrix::from_events(&[
            RatingEvent::new(1, 1, 5.0),
            RatingEvent::new(2, 2, 3.0),
            // user 3 has a row, but every cell of it is 0
            RatingEvent::new(3, 1, 0.0),
        ]);
        let index = SimilarityIndex::build(&matrix);
        let zero_row = matrix.user_row(3).unwrap();

        assert_eq!(index.get(zero_row, zero_row), 1.0);
        for other in 0..index.num_users() {
            if other != zero_row {
                assert_eq!(index.get(zero_row, other), 0.0);
                assert_eq!(index.get(other, zero_row), 0.0);
            }
        }
        assert!(index.matrix().iter().all(|s| !s.is_nan()));
    }

    #[test]
    fn test_cosine_zero_vector_any_dimension() {
        for dim in [0usize, 1, 3, 64] {
            let zero = Array1::<f32>::zeros(dim);
            let other = Array1::<f32>::from_elem(dim, 1.5);

            assert_eq!(cosine(zero.view(), other.view()), 0.0);
            assert_eq!(cosine(zero.view(), zero.view()), 0.0);
        }
    }

    #[test]
    fn test_cosine_scale_invariant() {
        let a = array![5.0f32, 0.0, 4.0];
        let b = array![10.0f32, 0.0, 8.0];
        assert!((cosine(a.view(), b.view()) - 1.0).abs() < 1e-6);
        assert!((l2_norm(a.view()) - 41f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_values_within_unit_range() {
        let index = SimilarityIndex::build(&three_users());
        assert!(index
            .matrix()
            .iter()
            .all(|s| !s.is_nan() && (0.0..=1.0 + 1e-6).contains(s)));
    }

    #[test]
    fn test_nearest_neighbors_excludes_self() {
        let sims = array![1.0, 0.2, 0.9, 0.4];
        let neighbors = nearest_neighbors(sims.view(), 2, Some(0));
        assert_eq!(neighbors, vec![(2, 0.9), (3, 0.4)]);
    }

    #[test]
    fn test_nearest_neighbors_tie_break_by_row() {
        let sims = array![0.5, 0.7, 0.5, 0.5];
        let neighbors = nearest_neighbors(sims.view(), 3, None);
        assert_eq!(neighbors, vec![(1, 0.7), (0, 0.5), (2, 0.5)]);
    }

    #[test]
    fn test_nearest_neighbors_fewer_than_k() {
        let sims = array![1.0, 0.3];
        let neighbors = nearest_neighbors(sims.view(), 5, Some(0));
        assert_eq!(neighbors, vec![(1, 0.3)]);
    }
}

//! Seeded train/test splitting.
//!
//! Follows shuffle-split semantics: `ceil(test_size * n)` rows go to test,
//! `floor(train_size * n)` rows to train, and any remainder is left out of
//! both partitions. The row shuffle uses ChaCha8 so a given `random_state`
//! produces the same partitions on every platform.

use polars::prelude::IdxSize;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use titanic_model::{Frame, SplitParameters};

use crate::error::{IngestError, Result};

/// Row positions selected for each partition, in shuffled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<IdxSize>,
    pub test: Vec<IdxSize>,
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(IngestError::InvalidSplit {
            reason: format!("{name} must be in the open interval (0, 1), got {value}"),
        });
    }
    Ok(())
}

/// Draws train and test row positions for a table of `n_rows` rows.
pub fn shuffle_split_indices(n_rows: usize, params: &SplitParameters) -> Result<SplitIndices> {
    check_fraction("train_size", params.train_size)?;
    check_fraction("test_size", params.test_size)?;
    if params.train_size + params.test_size > 1.0 {
        return Err(IngestError::InvalidSplit {
            reason: format!(
                "train_size + test_size must not exceed 1, got {}",
                params.train_size + params.test_size
            ),
        });
    }

    let n_test = (params.test_size * n_rows as f64).ceil() as usize;
    let n_train = (params.train_size * n_rows as f64).floor() as usize;
    if n_train == 0 || n_test == 0 {
        return Err(IngestError::InvalidSplit {
            reason: format!(
                "{n_rows} rows give {n_train} train and {n_test} test rows; both must be non-empty"
            ),
        });
    }
    if n_train + n_test > n_rows {
        return Err(IngestError::InvalidSplit {
            reason: format!("{n_train} train + {n_test} test rows exceed the {n_rows} available"),
        });
    }

    let upper = IdxSize::try_from(n_rows).map_err(|_| IngestError::InvalidSplit {
        reason: format!("{n_rows} rows exceed the supported table size"),
    })?;
    let mut order: Vec<IdxSize> = (0..upper).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(params.random_state);
    order.shuffle(&mut rng);

    let test = order[..n_test].to_vec();
    let train = order[n_test..n_test + n_train].to_vec();
    Ok(SplitIndices { train, test })
}

/// Splits aligned feature and target frames into
/// `(x_train, x_test, y_train, y_test)`.
pub fn split_train_test(
    features: &Frame,
    target: &Frame,
    params: &SplitParameters,
) -> Result<(Frame, Frame, Frame, Frame)> {
    if features.height() != target.height() {
        return Err(IngestError::InvalidSplit {
            reason: format!(
                "features have {} rows but target has {}",
                features.height(),
                target.height()
            ),
        });
    }
    let indices = shuffle_split_indices(features.height(), params)?;
    Ok((
        features.take(&indices.train)?,
        features.take(&indices.test)?,
        target.take(&indices.train)?,
        target.take(&indices.test)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn params(train_size: f64, test_size: f64, random_state: u64) -> SplitParameters {
        SplitParameters {
            train_size,
            test_size,
            random_state,
        }
    }

    #[test]
    fn sizes_follow_ceil_and_floor() {
        let split = shuffle_split_indices(891, &params(0.8, 0.2, 42)).unwrap();
        assert_eq!(split.test.len(), 179);
        assert_eq!(split.train.len(), 712);
    }

    #[test]
    fn remainder_is_excluded() {
        let split = shuffle_split_indices(100, &params(0.5, 0.2, 7)).unwrap();
        assert_eq!(split.train.len(), 50);
        assert_eq!(split.test.len(), 20);
        let all: BTreeSet<_> = split.train.iter().chain(split.test.iter()).collect();
        assert_eq!(all.len(), 70);
    }

    #[test]
    fn same_seed_same_partitions() {
        let a = shuffle_split_indices(50, &params(0.6, 0.4, 3)).unwrap();
        let b = shuffle_split_indices(50, &params(0.6, 0.4, 3)).unwrap();
        let c = shuffle_split_indices(50, &params(0.6, 0.4, 4)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_out_of_range_fractions() {
        assert!(shuffle_split_indices(10, &params(0.0, 0.2, 1)).is_err());
        assert!(shuffle_split_indices(10, &params(0.8, 1.0, 1)).is_err());
        assert!(shuffle_split_indices(10, &params(0.9, 0.2, 1)).is_err());
        assert!(shuffle_split_indices(10, &params(f64::NAN, 0.2, 1)).is_err());
    }

    #[test]
    fn rejects_empty_partitions() {
        let err = shuffle_split_indices(2, &params(0.4, 0.2, 1)).unwrap_err();
        assert!(matches!(err, IngestError::InvalidSplit { .. }));
    }
}

//! Input validation errors.
//!
//! Every variant is raised before the search starts. Running out of time is
//! not an error; it is reported through `SolveResult::exhaustive`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("ingredient vector has {actual} slots, expected {expected}")]
    VectorLength { expected: usize, actual: usize },

    #[error("max team size must be at least 1")]
    ZeroTeamSize,

    #[error("max team size {0} exceeds the supported maximum of {max}", max = u16::MAX)]
    TeamSizeTooLarge(usize),

    #[error("producer pool is empty but the recipe requires ingredients")]
    EmptyPool,

    #[error("inverted index refers to producer {index} but the pool has {len} producers")]
    ProducerOutOfRange { index: usize, len: usize },

    #[error("memo cache was filled against a pool of {cached} producers, this pool has {len}")]
    MemoPoolMismatch { cached: usize, len: usize },

    #[error("unknown ingredient `{0}`")]
    UnknownIngredient(String),

    #[error("malformed recipe entry `{0}` (expected name=amount)")]
    MalformedRecipe(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = InputError::VectorLength {
            expected: 19,
            actual: 3,
        };
        assert_eq!(err.to_string(), "ingredient vector has 3 slots, expected 19");
        assert_eq!(
            InputError::TeamSizeTooLarge(70_000).to_string(),
            "max team size 70000 exceeds the supported maximum of 65535"
        );
        assert_eq!(
            InputError::MemoPoolMismatch { cached: 8, len: 2 }.to_string(),
            "memo cache was filled against a pool of 8 producers, this pool has 2"
        );
        assert_eq!(
            InputError::UnknownIngredient("kale".into()).to_string(),
            "unknown ingredient `kale`"
        );
    }
}

//! Smallest-team search over ingredient producers.
//!
//! Given a recipe (required amount of each ingredient) and a pool of
//! producers (each yielding a fixed amount of each ingredient), find every
//! smallest team, up to a size budget, whose combined output covers the
//! recipe. This is a bounded, weighted set cover solved by memoized
//! branch-and-bound:
//!
//! - [`vector`]: fixed-length ingredient vectors, the recursion state and the
//!   ranking heuristics
//! - [`producer`]: the producer pool and the per-ingredient inverted index
//! - [`memo`]: the caller-owned cache of sub-problem results
//! - [`solver`]: the search itself and result assembly
//!
//! ```
//! use teamcover_core::{Ingredient, IngredientVector, MemoCache, Producer, ProducerPool, SetCover};
//!
//! let pool = ProducerPool::new(vec![
//!     Producer::new("oil", IngredientVector::from_pairs([(Ingredient::Oil, 10)])),
//!     Producer::new("corn", IngredientVector::from_pairs([(Ingredient::Corn, 8)])),
//! ]);
//! let index = pool.build_index();
//! let mut memo = MemoCache::new();
//! let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();
//!
//! let recipe = IngredientVector::from_pairs([(Ingredient::Oil, 10), (Ingredient::Corn, 8)]);
//! let result = solver.solve_recipe(&recipe, 3).unwrap();
//! assert!(result.exhaustive);
//! assert_eq!(result.team_size(), Some(2));
//! ```

mod error;
pub mod ingredient;
pub mod memo;
pub mod producer;
pub mod solver;
pub mod vector;

pub use error::InputError;
pub use ingredient::{Ingredient, INGREDIENT_COUNT};
pub use memo::{MemoCache, Solution};
pub use producer::{InvertedIndex, Producer, ProducerPool};
pub use solver::{SearchStats, SetCover, SolveResult, SolverConfig, Team, DEFAULT_TIMEOUT};
pub use vector::{IngredientVector, RecipeState};

/// Parse `name=amount` pairs separated by commas, e.g. `oil=22,corn=17`.
///
/// Repeated ingredients add up. Whitespace around names and amounts is ignored.
pub fn parse_recipe(text: &str) -> Result<IngredientVector, InputError> {
    let mut pairs = Vec::new();
    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, amount) = entry
            .split_once('=')
            .ok_or_else(|| InputError::MalformedRecipe(entry.to_string()))?;
        let ingredient: Ingredient = name.parse()?;
        let amount: u16 = amount
            .trim()
            .parse()
            .map_err(|_| InputError::MalformedRecipe(entry.to_string()))?;
        pairs.push((ingredient, amount));
    }
    Ok(IngredientVector::from_pairs(pairs))
}

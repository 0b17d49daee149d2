//! Solver orchestrator.
//!
//! `SetCover` borrows a producer pool, its inverted index and a memo cache,
//! and answers "smallest teams that cover this recipe" queries against them.
//! Calls are sequential (`&mut self`); each call searches on its own copy of
//! the index, so narrowing never leaks from one call into the next.

mod assemble;
mod search;
mod tests;
mod types;

use crate::memo::MemoCache;
use crate::producer::{InvertedIndex, ProducerPool};
use crate::vector::{IngredientVector, RecipeState};
use crate::InputError;
use search::SearchContext;
use std::time::Instant;
use tracing::{debug, warn};

pub use types::{SearchStats, SolveResult, SolverConfig, Team, DEFAULT_TIMEOUT};

/// Minimum-size team search over one producer pool.
pub struct SetCover<'a> {
    pool: &'a ProducerPool,
    index: &'a InvertedIndex,
    memo: &'a mut MemoCache,
    config: SolverConfig,
}

impl<'a> SetCover<'a> {
    /// Create a solver with the default configuration.
    ///
    /// Fails if `index` refers to producers outside `pool`, or if `memo`
    /// already holds results for a pool of another size.
    pub fn new(
        pool: &'a ProducerPool,
        index: &'a InvertedIndex,
        memo: &'a mut MemoCache,
    ) -> Result<Self, InputError> {
        Self::with_config(pool, index, memo, SolverConfig::default())
    }

    /// Create a solver with custom configuration
    ///
    /// Also binds `memo` to the pool's size; a non-empty cache filled against
    /// a pool of another size is rejected.
    pub fn with_config(
        pool: &'a ProducerPool,
        index: &'a InvertedIndex,
        memo: &'a mut MemoCache,
        config: SolverConfig,
    ) -> Result<Self, InputError> {
        index.validate_against(pool)?;
        memo.bind_pool(pool.len())?;
        Ok(Self {
            pool,
            index,
            memo,
            config,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn pool(&self) -> &'a ProducerPool {
        self.pool
    }

    /// Entries currently held by the shared memo cache.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Find every smallest team of at most `max_team_size` producers whose
    /// combined output covers `recipe`.
    ///
    /// Producers may appear more than once in a team. If the timeout cuts the
    /// search short the result is still well-formed but `exhaustive` is false.
    pub fn solve_recipe(
        &mut self,
        recipe: &IngredientVector,
        max_team_size: usize,
    ) -> Result<SolveResult<'a>, InputError> {
        if max_team_size == 0 {
            return Err(InputError::ZeroTeamSize);
        }
        let budget =
            u16::try_from(max_team_size).map_err(|_| InputError::TeamSizeTooLarge(max_team_size))?;
        if self.pool.is_empty() && !recipe.is_zero() {
            return Err(InputError::EmptyPool);
        }

        let state = RecipeState::new(recipe, budget);
        let tracked = state.rank_unsatisfied();
        debug!(%recipe, max_team_size, pivots = ?tracked, "solving recipe");

        let start = Instant::now();
        let deadline = start.checked_add(self.config.timeout);
        let mut ctx = SearchContext::new(self.pool, self.index, self.memo, budget, deadline);
        let solutions = search::solve(&mut ctx, &state, &tracked);

        let exhaustive = !ctx.timed_out;
        let stats = ctx.stats;
        if exhaustive {
            debug!(?stats, elapsed = ?start.elapsed(), raw = solutions.len(), "search complete");
        } else {
            warn!(?stats, timeout = ?self.config.timeout, "search timed out; result is not exhaustive");
        }

        Ok(SolveResult {
            exhaustive,
            teams: assemble::assemble_teams(self.pool, &solutions),
            stats,
        })
    }
}

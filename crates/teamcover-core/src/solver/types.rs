use crate::producer::Producer;
use crate::vector::IngredientVector;
use serde::Serialize;
use std::time::Duration;

/// How long a single `solve_recipe` call may search before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Wall-clock budget per `solve_recipe` call
    pub timeout: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SolverConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Effectively no time limit
    pub fn unbounded() -> Self {
        Self {
            timeout: Duration::MAX,
        }
    }
}

/// Counters collected during one `solve_recipe` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Recursive entries, memo hits included
    pub nodes: u64,
    pub memo_hits: u64,
    /// Writes to the shared memo cache; results that depend on narrowing
    /// stay in per-call scratch and are not counted
    pub memo_stores: u64,
    /// Producers tried as the next member
    pub candidates: u64,
    /// Entries that found the deadline already passed
    pub timeouts: u64,
}

/// One optimal team.
#[derive(Debug, Clone, Serialize)]
pub struct Team<'a> {
    /// Members in canonical (signature) order
    pub members: Vec<&'a Producer>,
    /// Pool indices of `members`, same order
    pub member_indices: Vec<usize>,
    /// Sum of the members' full output
    pub produced_ingredients: IngredientVector,
}

impl Team<'_> {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// What the team makes beyond `recipe`.
    pub fn surplus(&self, recipe: &IngredientVector) -> IngredientVector {
        self.produced_ingredients.saturating_sub(recipe)
    }
}

/// Outcome of `SetCover::solve_recipe`.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult<'a> {
    /// False if the deadline cut the search short
    pub exhaustive: bool,
    /// All distinct teams tied for the minimum size
    pub teams: Vec<Team<'a>>,
    pub stats: SearchStats,
}

impl SolveResult<'_> {
    /// Size shared by every returned team, if any were found.
    pub fn team_size(&self) -> Option<usize> {
        self.teams.first().map(Team::size)
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

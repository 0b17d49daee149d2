//! Branch-and-bound search for minimum-size completions of a recipe state.
//!
//! `solve` returns every minimal completion of a state: lists of producer
//! indices, all of one length, that cover the state's tracked ingredients
//! within its spots-left budget. Results are memoized by the state's
//! structural hash in a caller-owned cache. Results computed after the
//! outermost pivot has been narrowed only hold for this call's index, so they
//! go to a scratch cache that is dropped with the call.

use super::types::SearchStats;
use crate::ingredient::{Ingredient, INGREDIENT_COUNT};
use crate::memo::{MemoCache, Solution};
use crate::producer::{InvertedIndex, ProducerPool};
use crate::vector::{RecipeState, Subtraction};
use std::time::Instant;
use tracing::trace;

/// Mutable scratch state for one top-level solve.
pub(crate) struct SearchContext<'a> {
    pub pool: &'a ProducerPool,
    /// Private copy of the inverted index; narrowed during the call
    pub index: InvertedIndex,
    pub memo: &'a mut MemoCache,
    /// Results that depend on narrowing; never shared across calls
    scratch: MemoCache,
    pub max_team_size: u16,
    /// `None` when the timeout is too large to represent
    pub deadline: Option<Instant>,
    pub timed_out: bool,
    narrowed: [bool; INGREDIENT_COUNT],
    pub stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        pool: &'a ProducerPool,
        index: &InvertedIndex,
        memo: &'a mut MemoCache,
        max_team_size: u16,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            pool,
            index: index.clone(),
            memo,
            scratch: MemoCache::new(),
            max_team_size,
            deadline,
            timed_out: false,
            narrowed: [false; INGREDIENT_COUNT],
            stats: SearchStats::default(),
        }
    }

    fn deadline_passed(&mut self) -> bool {
        if !self.timed_out {
            if let Some(deadline) = self.deadline {
                self.timed_out = Instant::now() >= deadline;
            }
        }
        self.timed_out
    }

    fn lookup(&self, state: &RecipeState) -> Option<Vec<Solution>> {
        let key = state.memo_key();
        self.memo.get(key).or_else(|| self.scratch.get(key)).cloned()
    }

    /// Once the deadline has passed nothing is cached: a truncated search
    /// must not be remembered as unsolvable.
    fn remember(&mut self, state: &RecipeState, solutions: &[Solution]) {
        if self.timed_out {
            return;
        }
        if self.narrowed.contains(&true) {
            self.scratch.insert(state.memo_key(), solutions.to_vec());
        } else {
            self.memo.insert(state.memo_key(), solutions.to_vec());
            self.stats.memo_stores += 1;
        }
    }

    /// First completion through `ingredient` at the outermost depth: pin the
    /// index entry to the producer that achieved it for the rest of the call.
    fn narrow_once(&mut self, ingredient: Ingredient, producer: usize) {
        if self.narrowed[ingredient.id()] {
            return;
        }
        self.narrowed[ingredient.id()] = true;
        self.index.narrow(ingredient, producer);
        trace!(%ingredient, producer, "narrowed pivot candidates");
    }
}

/// Running minimum for one node: the best size seen and its solutions.
struct Best {
    size: usize,
    solutions: Vec<Solution>,
}

impl Best {
    fn new(budget: usize) -> Self {
        Self {
            size: budget,
            solutions: Vec::new(),
        }
    }

    /// Offer `producer` followed by each of `tails` (all of one length).
    fn offer(&mut self, producer: usize, tails: &[Solution], size: usize) {
        if size > self.size {
            return;
        }
        if size < self.size {
            self.size = size;
            self.solutions.clear();
        }
        self.solutions.extend(tails.iter().map(|tail| {
            let mut team = Vec::with_capacity(tail.len() + 1);
            team.push(producer);
            team.extend_from_slice(tail);
            team
        }));
    }
}

/// All minimum-size completions of `state`, hardest ingredient first.
///
/// `tracked` lists the unsatisfied ingredients of `state` in pivot order.
pub(crate) fn solve(
    ctx: &mut SearchContext<'_>,
    state: &RecipeState,
    tracked: &[Ingredient],
) -> Vec<Solution> {
    ctx.stats.nodes += 1;

    if let Some(cached) = ctx.lookup(state) {
        ctx.stats.memo_hits += 1;
        return cached;
    }

    if tracked.is_empty() || state.spots_left() == 0 {
        ctx.remember(state, &[]);
        return Vec::new();
    }
    if ctx.deadline_passed() {
        ctx.stats.timeouts += 1;
        return Vec::new();
    }

    let pivot = tracked[0];
    let outermost = state.spots_left() == ctx.max_team_size;

    let mut branches: Vec<(usize, Subtraction)> = ctx
        .index
        .candidates(pivot)
        .iter()
        .map(|&producer| {
            let produced = &ctx.pool[producer].ingredients;
            (producer, state.subtract(produced, tracked))
        })
        .collect();
    // Best-first ordering only; every branch is still visited.
    branches.sort_by_key(|(_, sub)| sub.remaining_total);
    ctx.stats.candidates += branches.len() as u64;

    let mut best = Best::new(state.spots_left() as usize);

    for (producer, sub) in branches {
        if sub.remaining_total == 0 {
            best.offer(producer, &[Vec::new()], 1);
            if outermost {
                ctx.narrow_once(pivot, producer);
            }
            continue;
        }

        // A single member already completes this state; nothing deeper can tie.
        if best.size == 1 || sub.next.spots_left() == 0 {
            continue;
        }

        let tails = solve(ctx, &sub.next, &sub.remaining);
        let Some(first) = tails.first() else {
            continue;
        };
        let size = first.len() + 1;
        best.offer(producer, &tails, size);
        if outermost {
            ctx.narrow_once(pivot, producer);
        }
    }

    ctx.remember(state, &best.solutions);
    best.solutions
}

//! Ingredient vectors, the recursion state, and the ranking heuristics.
//!
//! `IngredientVector` is a fixed `[u16; N]` with one slot per ingredient id.
//! `RecipeState` appends one trailing "spots left" slot; it is both the
//! search state and the memoization key. All arithmetic saturates, so no
//! slot ever goes negative.

use crate::ingredient::{Ingredient, INGREDIENT_COUNT};
use crate::InputError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

/// Slots in a `RecipeState`: one per ingredient plus spots-left.
pub const STATE_LEN: usize = INGREDIENT_COUNT + 1;
const SPOTS_SLOT: usize = INGREDIENT_COUNT;

// ==================== FNV-1a ====================

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a, used for memo keys and producer signatures.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fnv1a(u64);

impl Fnv1a {
    pub(crate) fn new() -> Self {
        Self(FNV_OFFSET)
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 ^= byte as u64;
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

// ==================== IngredientVector ====================

/// Amount of every ingredient, indexed by `Ingredient::id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<Ingredient, u16>",
    from = "BTreeMap<Ingredient, u16>"
)]
pub struct IngredientVector([u16; INGREDIENT_COUNT]);

impl IngredientVector {
    pub fn zero() -> Self {
        Self([0; INGREDIENT_COUNT])
    }

    /// Build from raw slots; the slice must have exactly one entry per ingredient.
    pub fn from_slice(amounts: &[u16]) -> Result<Self, InputError> {
        let slots: [u16; INGREDIENT_COUNT] =
            amounts.try_into().map_err(|_| InputError::VectorLength {
                expected: INGREDIENT_COUNT,
                actual: amounts.len(),
            })?;
        Ok(Self(slots))
    }

    /// Build from `(ingredient, amount)` pairs; repeated ingredients add up.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Ingredient, u16)>,
    {
        let mut vector = Self::zero();
        for (ingredient, amount) in pairs {
            let slot = &mut vector.0[ingredient.id()];
            *slot = slot.saturating_add(amount);
        }
        vector
    }

    #[inline]
    pub fn get(&self, ingredient: Ingredient) -> u16 {
        self.0[ingredient.id()]
    }

    #[inline]
    pub fn set(&mut self, ingredient: Ingredient, amount: u16) {
        self.0[ingredient.id()] = amount;
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|&a| a as u32).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&a| a == 0)
    }

    /// Ingredients with a positive amount, in id order.
    pub fn iter_positive(&self) -> impl Iterator<Item = (Ingredient, u16)> + '_ {
        Ingredient::ALL
            .iter()
            .zip(self.0.iter())
            .filter(|(_, amount)| **amount > 0)
            .map(|(&ingredient, &amount)| (ingredient, amount))
    }

    /// True if every slot is at least the corresponding slot of `required`.
    pub fn covers(&self, required: &IngredientVector) -> bool {
        self.0.iter().zip(required.0.iter()).all(|(have, need)| have >= need)
    }

    /// Component-wise `self - other`, clamped at zero.
    pub fn saturating_sub(&self, other: &IngredientVector) -> IngredientVector {
        let mut out = *self;
        for (slot, &amount) in out.0.iter_mut().zip(other.0.iter()) {
            *slot = slot.saturating_sub(amount);
        }
        out
    }
}

impl AddAssign<&IngredientVector> for IngredientVector {
    fn add_assign(&mut self, rhs: &IngredientVector) {
        for (slot, &amount) in self.0.iter_mut().zip(rhs.0.iter()) {
            *slot = slot.saturating_add(amount);
        }
    }
}

impl Add for IngredientVector {
    type Output = IngredientVector;

    fn add(mut self, rhs: IngredientVector) -> IngredientVector {
        self += &rhs;
        self
    }
}

impl From<BTreeMap<Ingredient, u16>> for IngredientVector {
    fn from(map: BTreeMap<Ingredient, u16>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<IngredientVector> for BTreeMap<Ingredient, u16> {
    fn from(vector: IngredientVector) -> Self {
        vector.iter_positive().collect()
    }
}

impl std::fmt::Display for IngredientVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (ingredient, amount) in self.iter_positive() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", amount, ingredient.short_name())?;
            first = false;
        }
        if first {
            write!(f, "nothing")?;
        }
        Ok(())
    }
}

// ==================== RecipeState ====================

/// Residual requirement plus remaining team-size budget.
///
/// Values are never mutated once built; `subtract` returns a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeState([u16; STATE_LEN]);

/// Outcome of assigning one producer to a state.
#[derive(Debug, Clone)]
pub struct Subtraction {
    pub next: RecipeState,
    /// Tracked ingredients still unsatisfied, in the caller's order
    pub remaining: Vec<Ingredient>,
    /// Sum of what is still required across the tracked ingredients
    pub remaining_total: u32,
}

impl RecipeState {
    /// The recipe with `spots_left` appended as the trailing slot.
    pub fn new(recipe: &IngredientVector, spots_left: u16) -> Self {
        let mut slots = [0u16; STATE_LEN];
        slots[..INGREDIENT_COUNT].copy_from_slice(&recipe.0);
        slots[SPOTS_SLOT] = spots_left;
        Self(slots)
    }

    #[inline]
    pub fn spots_left(&self) -> u16 {
        self.0[SPOTS_SLOT]
    }

    #[inline]
    pub fn amount(&self, ingredient: Ingredient) -> u16 {
        self.0[ingredient.id()]
    }

    pub fn requirement(&self) -> IngredientVector {
        let mut vector = IngredientVector::zero();
        vector.0.copy_from_slice(&self.0[..INGREDIENT_COUNT]);
        vector
    }

    /// Unsatisfied ingredients, hardest first.
    ///
    /// Ordered by `amount * value` descending; equal scores keep id order.
    pub fn rank_unsatisfied(&self) -> Vec<Ingredient> {
        let mut ranked: Vec<(Ingredient, u32)> = Ingredient::ALL
            .iter()
            .filter(|ing| self.amount(**ing) > 0)
            .map(|&ing| (ing, self.amount(ing) as u32 * ing.value()))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(ing, _)| ing).collect()
    }

    /// Assign a producer: subtract its output on `tracked` and use up one spot.
    pub fn subtract(&self, produced: &IngredientVector, tracked: &[Ingredient]) -> Subtraction {
        let mut next = *self;
        let mut remaining = Vec::with_capacity(tracked.len());
        let mut remaining_total = 0u32;

        for &ingredient in tracked {
            let id = ingredient.id();
            next.0[id] = next.0[id].saturating_sub(produced.0[id]);
            if next.0[id] > 0 {
                remaining.push(ingredient);
                remaining_total += next.0[id] as u32;
            }
        }
        next.0[SPOTS_SLOT] = next.0[SPOTS_SLOT].saturating_sub(1);

        Subtraction {
            next,
            remaining,
            remaining_total,
        }
    }

    /// Structural hash of every slot, spots-left included.
    pub fn memo_key(&self) -> u64 {
        let mut hasher = Fnv1a::new();
        for slot in &self.0 {
            hasher.write(&slot.to_le_bytes());
        }
        hasher.finish()
    }
}

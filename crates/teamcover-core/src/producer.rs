//! Producer pool and the per-ingredient inverted index.
//!
//! The pool is a flat, 0-indexed list. The inverted index maps every
//! ingredient to the producers yielding a positive amount of it, in pool
//! order. Both are built once per set of eligible producers and reused
//! across solves.

use crate::ingredient::{Ingredient, INGREDIENT_COUNT};
use crate::vector::{Fnv1a, IngredientVector};
use crate::InputError;
use serde::{Deserialize, Serialize};

/// A candidate team member with a fixed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    /// Opaque identity, e.g. "Dragonite (oil/herb/corn)"
    pub label: String,
    pub ingredients: IngredientVector,
}

impl Producer {
    pub fn new(label: impl Into<String>, ingredients: IngredientVector) -> Self {
        Self {
            label: label.into(),
            ingredients,
        }
    }

    /// Order-independent identity hash, used to canonicalize teams.
    pub fn signature(&self) -> u64 {
        let mut hasher = Fnv1a::new();
        hasher.write(self.label.as_bytes());
        hasher.finish()
    }
}

/// Flat list of producers; indices are stable for the pool's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProducerPool {
    producers: Vec<Producer>,
}

impl ProducerPool {
    pub fn new(producers: Vec<Producer>) -> Self {
        Self { producers }
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Producer> {
        self.producers.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Producer> {
        self.producers.iter()
    }

    pub fn push(&mut self, producer: Producer) -> usize {
        self.producers.push(producer);
        self.producers.len() - 1
    }

    /// Derive the inverted index in pool order.
    pub fn build_index(&self) -> InvertedIndex {
        let mut index = InvertedIndex::empty();
        for (idx, producer) in self.producers.iter().enumerate() {
            for (ingredient, _) in producer.ingredients.iter_positive() {
                index.entries[ingredient.id()].push(idx);
            }
        }
        index
    }
}

impl std::ops::Index<usize> for ProducerPool {
    type Output = Producer;

    fn index(&self, index: usize) -> &Producer {
        &self.producers[index]
    }
}

impl FromIterator<Producer> for ProducerPool {
    fn from_iter<I: IntoIterator<Item = Producer>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// `ingredient -> producer indices` with a positive amount of it.
///
/// The solver clones this at the start of every solve and narrows the
/// clone; the original is never modified by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    entries: [Vec<usize>; INGREDIENT_COUNT],
}

impl InvertedIndex {
    pub fn empty() -> Self {
        Self {
            entries: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Index with caller-chosen entries, one per ingredient.
    pub fn from_entries(entries: [Vec<usize>; INGREDIENT_COUNT]) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn candidates(&self, ingredient: Ingredient) -> &[usize] {
        &self.entries[ingredient.id()]
    }

    /// Replace the entry for `ingredient` with a single producer.
    pub fn narrow(&mut self, ingredient: Ingredient, producer: usize) {
        let entry = &mut self.entries[ingredient.id()];
        entry.clear();
        entry.push(producer);
    }

    /// Every referenced producer must exist in `pool`.
    pub fn validate_against(&self, pool: &ProducerPool) -> Result<(), InputError> {
        let len = pool.len();
        match self.entries.iter().flatten().find(|&&idx| idx >= len) {
            Some(&index) => Err(InputError::ProducerOutOfRange { index, len }),
            None => Ok(()),
        }
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::empty()
    }
}

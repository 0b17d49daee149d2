//! Raw solutions -> deduplicated teams.

use super::types::Team;
use crate::memo::Solution;
use crate::producer::ProducerPool;
use crate::vector::IngredientVector;
use std::collections::HashSet;

/// Canonicalize, deduplicate and total up raw solutions.
///
/// Members are sorted by signature (label as tiebreak), so permutations of
/// one multiset of producers collapse into the first team seen.
pub(crate) fn assemble_teams<'a>(pool: &'a ProducerPool, solutions: &[Solution]) -> Vec<Team<'a>> {
    let mut seen: HashSet<Vec<u64>> = HashSet::new();
    let mut teams = Vec::new();

    for solution in solutions {
        let mut members: Vec<(u64, usize)> = solution
            .iter()
            .map(|&idx| (pool[idx].signature(), idx))
            .collect();
        members.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| pool[a.1].label.cmp(&pool[b.1].label))
        });

        let key: Vec<u64> = members.iter().map(|(sig, _)| *sig).collect();
        if !seen.insert(key) {
            continue;
        }

        let mut produced = IngredientVector::zero();
        for &(_, idx) in &members {
            produced += &pool[idx].ingredients;
        }

        teams.push(Team {
            members: members.iter().map(|&(_, idx)| &pool[idx]).collect(),
            member_indices: members.iter().map(|&(_, idx)| idx).collect(),
            produced_ingredients: produced,
        });
    }

    teams
}

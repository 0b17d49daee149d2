//! End-to-end tests for `SetCover::solve_recipe`

#[cfg(test)]
mod tests {
    use crate::solver::{SetCover, SolveResult, SolverConfig};
    use crate::{Ingredient, IngredientVector, InputError, MemoCache, Producer, ProducerPool};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn producer(label: &str, pairs: &[(Ingredient, u16)]) -> Producer {
        Producer::new(label, IngredientVector::from_pairs(pairs.iter().copied()))
    }

    fn recipe(pairs: &[(Ingredient, u16)]) -> IngredientVector {
        IngredientVector::from_pairs(pairs.iter().copied())
    }

    /// Dragonite, Cramorant and Victreebel variants.
    fn sleep_pool() -> ProducerPool {
        use Ingredient::*;
        ProducerPool::new(vec![
            producer("Dragonite (herb/oil)", &[(Oil, 12), (Herb, 7)]),
            producer("Dragonite (herb/oil/corn)", &[(Oil, 9), (Herb, 4), (Corn, 17)]),
            producer("Cramorant (oil/oil)", &[(Oil, 15)]),
            producer("Cramorant (oil/potato)", &[(Oil, 13), (Potato, 4)]),
            producer("Cramorant (oil/potato/egg)", &[(Oil, 10), (Potato, 5), (Egg, 3)]),
            producer("Victreebel (tomato/potato)", &[(Tomato, 14), (Potato, 5)]),
            producer("Victreebel (tomato/tomato/leek)", &[(Tomato, 19), (Leek, 3)]),
            producer("Victreebel (tomato/potato/leek)", &[(Tomato, 14), (Potato, 4), (Leek, 2)]),
        ])
    }

    fn sleep_recipe() -> IngredientVector {
        use Ingredient::*;
        recipe(&[(Oil, 22), (Corn, 17), (Tomato, 14), (Potato, 9)])
    }

    fn solve_fresh(pool: &ProducerPool, recipe: &IngredientVector, max: usize) -> (bool, Vec<Vec<usize>>) {
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver =
            SetCover::with_config(pool, &index, &mut memo, SolverConfig::unbounded()).unwrap();
        let result = solver.solve_recipe(recipe, max).unwrap();
        (result.exhaustive, team_sets(&result))
    }

    fn team_sets(result: &SolveResult<'_>) -> Vec<Vec<usize>> {
        let mut teams: Vec<Vec<usize>> = result
            .teams
            .iter()
            .map(|team| {
                let mut members = team.member_indices.clone();
                members.sort_unstable();
                members
            })
            .collect();
        teams.sort();
        teams
    }

    fn labels(result: &SolveResult<'_>, team: usize) -> BTreeSet<String> {
        result.teams[team]
            .members
            .iter()
            .map(|p| p.label.clone())
            .collect()
    }

    /// Smallest team size (with repeats) covering `recipe`, by exhaustive enumeration.
    fn brute_force_min(pool: &ProducerPool, recipe: &IngredientVector, max: usize) -> Option<usize> {
        fn search(
            pool: &ProducerPool,
            recipe: &IngredientVector,
            start: usize,
            left: usize,
            acc: IngredientVector,
        ) -> bool {
            if acc.covers(recipe) {
                return true;
            }
            if left == 0 {
                return false;
            }
            (start..pool.len()).any(|i| search(pool, recipe, i, left - 1, acc + pool[i].ingredients))
        }

        if recipe.is_zero() {
            return Some(0);
        }
        (1..=max).find(|&size| search(pool, recipe, 0, size, IngredientVector::zero()))
    }

    // ==================== Scenario ====================

    #[test]
    fn test_sleep_scenario_needs_three() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();

        let result = solver.solve_recipe(&sleep_recipe(), 5).unwrap();

        assert!(result.exhaustive);
        assert_eq!(result.team_size(), Some(3));
        assert_eq!(brute_force_min(&pool, &sleep_recipe(), 5), Some(3));

        // Two raw orderings of the same trio collapse into one team
        assert_eq!(result.teams.len(), 1);
        let expected: BTreeSet<String> = [
            "Dragonite (herb/oil/corn)",
            "Cramorant (oil/potato)",
            "Victreebel (tomato/potato)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(labels(&result, 0), expected);

        let produced = result.teams[0].produced_ingredients;
        assert_eq!(produced.get(Ingredient::Oil), 22);
        assert_eq!(produced.get(Ingredient::Corn), 17);
        assert_eq!(produced.get(Ingredient::Tomato), 14);
        assert_eq!(produced.get(Ingredient::Potato), 9);
        assert_eq!(produced.get(Ingredient::Herb), 4);
        assert_eq!(result.teams[0].surplus(&sleep_recipe()).get(Ingredient::Herb), 4);
    }

    #[test]
    fn test_scenario_budget_too_small() {
        let (exhaustive, teams) = solve_fresh(&sleep_pool(), &sleep_recipe(), 2);
        assert!(exhaustive);
        assert!(teams.is_empty());
    }

    // ==================== Properties ====================

    #[rstest]
    #[case::sleep(sleep_pool(), sleep_recipe(), 5)]
    #[case::oil_and_egg(
        ProducerPool::new(vec![
            producer("oil", &[(Ingredient::Oil, 10)]),
            producer("egg", &[(Ingredient::Egg, 10)]),
            producer("both", &[(Ingredient::Oil, 5), (Ingredient::Egg, 5)]),
        ]),
        recipe(&[(Ingredient::Oil, 10), (Ingredient::Egg, 10)]),
        4
    )]
    #[case::three_way(
        ProducerPool::new(vec![
            producer("tomato/potato", &[(Ingredient::Tomato, 10), (Ingredient::Potato, 10)]),
            producer("leek", &[(Ingredient::Leek, 10)]),
            producer("tomato/leek", &[(Ingredient::Tomato, 10), (Ingredient::Leek, 10)]),
            producer("potato", &[(Ingredient::Potato, 10)]),
            producer("a bit of everything", &[(Ingredient::Tomato, 5), (Ingredient::Potato, 5), (Ingredient::Leek, 5)]),
        ]),
        recipe(&[(Ingredient::Tomato, 10), (Ingredient::Potato, 10), (Ingredient::Leek, 10)]),
        3
    )]
    #[case::single_member(
        ProducerPool::new(vec![
            producer("small corn", &[(Ingredient::Corn, 3)]),
            producer("big corn", &[(Ingredient::Corn, 5), (Ingredient::Oil, 1)]),
        ]),
        recipe(&[(Ingredient::Corn, 5)]),
        3
    )]
    fn test_minimal_and_covering(
        #[case] pool: ProducerPool,
        #[case] recipe: IngredientVector,
        #[case] max: usize,
    ) {
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver =
            SetCover::with_config(&pool, &index, &mut memo, SolverConfig::unbounded()).unwrap();
        let result = solver.solve_recipe(&recipe, max).unwrap();

        assert!(result.exhaustive);
        assert_eq!(result.team_size(), brute_force_min(&pool, &recipe, max));
        for team in &result.teams {
            assert!(team.produced_ingredients.covers(&recipe));
            assert_eq!(team.size(), result.team_size().unwrap());
        }
    }

    #[test]
    fn test_random_pools_cover_uniformly() {
        let ingredients = [
            Ingredient::Oil,
            Ingredient::Corn,
            Ingredient::Egg,
            Ingredient::Leek,
        ];

        for seed in 0..60u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pool: ProducerPool = (0..6)
                .map(|i| {
                    let pairs: Vec<(Ingredient, u16)> = ingredients
                        .iter()
                        .map(|&ing| (ing, rng.gen_range(0..=6)))
                        .collect();
                    producer(&format!("producer {i}"), &pairs)
                })
                .collect();
            let pairs: Vec<(Ingredient, u16)> = ingredients
                .iter()
                .map(|&ing| (ing, rng.gen_range(0..=10)))
                .collect();
            let recipe = recipe(&pairs);

            let index = pool.build_index();
            let mut memo = MemoCache::new();
            let mut solver =
                SetCover::with_config(&pool, &index, &mut memo, SolverConfig::unbounded()).unwrap();
            let result = solver.solve_recipe(&recipe, 3).unwrap();
            assert!(result.exhaustive, "seed {seed}");

            // Every returned team covers the recipe, all teams share one size
            let size = result.team_size();
            for team in &result.teams {
                assert!(team.produced_ingredients.covers(&recipe), "seed {seed}");
                assert_eq!(Some(team.size()), size, "seed {seed}");
                assert!(team.size() <= 3, "seed {seed}");
            }

            // No duplicate multisets survive
            let sets = team_sets(&result);
            let unique: BTreeSet<_> = sets.iter().cloned().collect();
            assert_eq!(unique.len(), sets.len(), "seed {seed}");

            // A team is found exactly when one exists, and never below the true
            // minimum. It can land above it: see
            // `test_narrowing_can_cost_minimality`.
            let min = brute_force_min(&pool, &recipe, 3);
            if recipe.is_zero() {
                assert!(result.is_empty());
            } else {
                assert_eq!(result.is_empty(), min.is_none(), "seed {seed}");
                if let (Some(found), Some(min)) = (size, min) {
                    assert!(found >= min, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_fresh_caches_agree() {
        let first = solve_fresh(&sleep_pool(), &sleep_recipe(), 5);
        let second = solve_fresh(&sleep_pool(), &sleep_recipe(), 5);
        assert_eq!(first, second);
    }

    // ==================== Index narrowing ====================

    #[test]
    fn test_narrowing_does_not_leak_between_calls() {
        let pool = ProducerPool::new(vec![
            producer("oil only", &[(Ingredient::Oil, 5)]),
            producer("oil and egg", &[(Ingredient::Oil, 5), (Ingredient::Egg, 5)]),
        ]);
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();

        // Narrows the oil entry to "oil only" inside this call
        let first = solver
            .solve_recipe(&recipe(&[(Ingredient::Oil, 5)]), 2)
            .unwrap();
        assert_eq!(team_sets(&first), vec![vec![0], vec![1]]);

        // Needs the other oil producer; a stale narrowing would force a pair
        let second = solver
            .solve_recipe(&recipe(&[(Ingredient::Oil, 5), (Ingredient::Egg, 5)]), 2)
            .unwrap();
        assert_eq!(team_sets(&second), vec![vec![1]]);

        drop(solver);
        assert_eq!(index, pool.build_index());
    }

    /// Pool where the first call explores `3 oil, 4 egg, 6 leek` with three
    /// spots only after leek has been narrowed to the last producer.
    fn leek_pool() -> ProducerPool {
        use Ingredient::*;
        ProducerPool::new(vec![
            producer("p0", &[(Oil, 2), (Egg, 4), (Leek, 4), (Corn, 3)]),
            producer("p1", &[(Oil, 6), (Egg, 4), (Leek, 6), (Corn, 6)]),
            producer("p2", &[(Oil, 6), (Leek, 3)]),
            producer("p3", &[(Oil, 3), (Egg, 4), (Leek, 2), (Corn, 4)]),
            producer("p4", &[(Oil, 4), (Egg, 6), (Leek, 3), (Corn, 1)]),
            producer("p5", &[(Oil, 6), (Egg, 6), (Leek, 5)]),
        ])
    }

    #[test]
    fn test_narrowed_subproblems_stay_private() {
        use Ingredient::*;
        let pool = leek_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();

        // Leek is narrowed to p5 once the p5 branch completes; the p0 branch
        // that follows reaches the state solved below
        solver
            .solve_recipe(&recipe(&[(Oil, 5), (Egg, 8), (Leek, 10)]), 4)
            .unwrap();

        let rest = recipe(&[(Oil, 3), (Egg, 4), (Leek, 6)]);
        let shared = solver.solve_recipe(&rest, 3).unwrap();
        assert!(shared.exhaustive);
        assert_eq!(shared.team_size(), Some(1));
        assert_eq!(team_sets(&shared), vec![vec![1]]);
        assert_eq!((true, team_sets(&shared)), solve_fresh(&pool, &rest, 3));
    }

    #[test]
    fn test_narrowing_can_cost_minimality() {
        use Ingredient::*;
        // Two "half" producers cover the recipe. With a third spot, "egg heavy"
        // completes first and pins oil to itself, so the half branch can only
        // finish through it.
        let pool = ProducerPool::new(vec![
            producer("half", &[(Oil, 5), (Egg, 5)]),
            producer("egg heavy", &[(Oil, 2), (Egg, 10)]),
        ]);
        let target = recipe(&[(Oil, 10), (Egg, 10)]);
        assert_eq!(brute_force_min(&pool, &target, 3), Some(2));

        let (exhaustive, teams) = solve_fresh(&pool, &target, 2);
        assert!(exhaustive);
        assert_eq!(teams, vec![vec![0, 0]]);

        let (exhaustive, teams) = solve_fresh(&pool, &target, 3);
        assert!(exhaustive);
        assert_eq!(teams, vec![vec![0, 0, 1]]);
    }

    // ==================== Memoization ====================

    #[test]
    fn test_repeat_call_reuses_subproblems() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();

        let first = solver.solve_recipe(&sleep_recipe(), 5).unwrap();
        let cached = solver.memo_len();
        assert!(cached > 0);

        // The root itself was finished after narrowing and is searched again
        let second = solver.solve_recipe(&sleep_recipe(), 5).unwrap();
        assert_eq!(team_sets(&first), team_sets(&second));
        assert!(second.stats.memo_hits > 0);
        assert!(second.stats.nodes < first.stats.nodes);
        assert_eq!(second.stats.memo_stores, 0);
        assert_eq!(solver.memo_len(), cached);
    }

    #[test]
    fn test_subproblems_shared_across_recipes() {
        use Ingredient::*;
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();
        solver.solve_recipe(&sleep_recipe(), 5).unwrap();

        // What remains after the corn Dragonite, with one spot used
        let rest = recipe(&[(Oil, 13), (Tomato, 14), (Potato, 9)]);
        let result = solver.solve_recipe(&rest, 4).unwrap();

        assert_eq!(result.stats.memo_hits, 1);
        assert_eq!(result.stats.nodes, 1);
        assert_eq!(result.teams.len(), 1);
        let expected: BTreeSet<String> = ["Cramorant (oil/potato)", "Victreebel (tomato/potato)"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(labels(&result, 0), expected);
    }

    #[test]
    fn test_memo_survives_solver() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        {
            let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();
            solver.solve_recipe(&sleep_recipe(), 5).unwrap();
        }
        assert!(!memo.is_empty());

        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();
        let result = solver.solve_recipe(&sleep_recipe(), 5).unwrap();
        assert!(result.stats.memo_hits > 0);
        assert_eq!(result.team_size(), Some(3));
    }

    #[test]
    fn test_memo_tied_to_pool_size() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        SetCover::new(&pool, &index, &mut memo)
            .unwrap()
            .solve_recipe(&sleep_recipe(), 5)
            .unwrap();

        let smaller: ProducerPool = pool.iter().take(2).cloned().collect();
        let smaller_index = smaller.build_index();
        assert_eq!(
            SetCover::new(&smaller, &smaller_index, &mut memo).err(),
            Some(InputError::MemoPoolMismatch { cached: 8, len: 2 })
        );

        memo.clear();
        assert!(SetCover::new(&smaller, &smaller_index, &mut memo).is_ok());
    }

    // ==================== Timeout ====================

    #[test]
    fn test_zero_timeout_is_not_exhaustive() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let config = SolverConfig::with_timeout(Duration::ZERO);
        let mut solver = SetCover::with_config(&pool, &index, &mut memo, config).unwrap();

        let result = solver.solve_recipe(&sleep_recipe(), 5).unwrap();
        assert!(!result.exhaustive);
        assert!(result.teams.is_empty());
        assert!(result.stats.timeouts > 0);
        // Nothing truncated was cached
        assert_eq!(solver.memo_len(), 0);
    }

    #[test]
    fn test_unbounded_timeout_is_exhaustive() {
        let (exhaustive, teams) = solve_fresh(&sleep_pool(), &sleep_recipe(), 5);
        assert!(exhaustive);
        assert_eq!(teams.len(), 1);
    }

    #[test]
    fn test_timeout_then_retry_recovers() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        {
            let config = SolverConfig::with_timeout(Duration::ZERO);
            let mut solver = SetCover::with_config(&pool, &index, &mut memo, config).unwrap();
            assert!(!solver.solve_recipe(&sleep_recipe(), 5).unwrap().exhaustive);
        }

        let mut solver =
            SetCover::with_config(&pool, &index, &mut memo, SolverConfig::unbounded()).unwrap();
        let result = solver.solve_recipe(&sleep_recipe(), 5).unwrap();
        assert!(result.exhaustive);
        assert_eq!(result.team_size(), Some(3));
    }

    // ==================== Validation ====================

    #[test]
    fn test_zero_team_size_rejected() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();

        assert_eq!(
            solver.solve_recipe(&sleep_recipe(), 0).err(),
            Some(InputError::ZeroTeamSize)
        );
        assert_eq!(
            solver.solve_recipe(&sleep_recipe(), 70_000).err(),
            Some(InputError::TeamSizeTooLarge(70_000))
        );
        assert_eq!(solver.memo_len(), 0);
    }

    #[test]
    fn test_empty_pool() {
        let pool = ProducerPool::default();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();

        assert_eq!(
            solver.solve_recipe(&sleep_recipe(), 3).err(),
            Some(InputError::EmptyPool)
        );
        // Nothing to cover is fine
        let result = solver.solve_recipe(&IngredientVector::zero(), 3).unwrap();
        assert!(result.exhaustive);
        assert!(result.is_empty());
    }

    #[test]
    fn test_index_must_match_pool() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let smaller: ProducerPool = pool.iter().take(2).cloned().collect();
        let mut memo = MemoCache::new();

        assert!(matches!(
            SetCover::new(&smaller, &index, &mut memo),
            Err(InputError::ProducerOutOfRange { len: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_ingredient_is_unsolvable() {
        let (exhaustive, teams) =
            solve_fresh(&sleep_pool(), &recipe(&[(Ingredient::Tail, 1)]), 5);
        assert!(exhaustive);
        assert!(teams.is_empty());
    }

    #[test]
    fn test_result_serializes() {
        let pool = sleep_pool();
        let index = pool.build_index();
        let mut memo = MemoCache::new();
        let mut solver = SetCover::new(&pool, &index, &mut memo).unwrap();
        let result = solver.solve_recipe(&sleep_recipe(), 5).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["exhaustive"], true);
        assert_eq!(json["teams"][0]["members"].as_array().unwrap().len(), 3);
        assert_eq!(json["teams"][0]["produced_ingredients"]["corn"], 17);
    }
}

//! Basic example of using the team cover solver

use teamcover_core::{
    parse_recipe, Ingredient, IngredientVector, MemoCache, Producer, ProducerPool, SetCover,
};

fn producer(label: &str, pairs: &[(Ingredient, u16)]) -> Producer {
    Producer::new(label, IngredientVector::from_pairs(pairs.iter().copied()))
}

fn main() {
    use Ingredient::*;

    // Build the pool and its inverted index once
    let pool = ProducerPool::new(vec![
        producer("Dragonite (herb/oil)", &[(Oil, 12), (Herb, 7)]),
        producer("Dragonite (herb/oil/corn)", &[(Oil, 9), (Herb, 4), (Corn, 17)]),
        producer("Cramorant (oil/oil)", &[(Oil, 15)]),
        producer("Cramorant (oil/potato)", &[(Oil, 13), (Potato, 4)]),
        producer("Cramorant (oil/potato/egg)", &[(Oil, 10), (Potato, 5), (Egg, 3)]),
        producer("Victreebel (tomato/potato)", &[(Tomato, 14), (Potato, 5)]),
        producer("Victreebel (tomato/tomato/leek)", &[(Tomato, 19), (Leek, 3)]),
        producer("Victreebel (tomato/potato/leek)", &[(Tomato, 14), (Potato, 4), (Leek, 2)]),
    ]);
    let index = pool.build_index();
    let mut memo = MemoCache::new();

    let mut solver = match SetCover::new(&pool, &index, &mut memo) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Invalid pool: {}", e);
            return;
        }
    };

    // Solve a few recipes against the same pool, sharing the memo cache
    for text in ["oil=22,corn=17,tomato=14,potato=9", "oil=13,tomato=14,potato=9", "tail=1"] {
        let recipe = match parse_recipe(text) {
            Ok(recipe) => recipe,
            Err(e) => {
                eprintln!("Bad recipe {}: {}", text, e);
                continue;
            }
        };

        println!("Recipe: {}", recipe);
        match solver.solve_recipe(&recipe, 5) {
            Ok(result) => {
                if result.is_empty() {
                    println!("  No team of up to 5 covers it");
                }
                for team in &result.teams {
                    println!("  Team of {}:", team.size());
                    for member in &team.members {
                        println!("    {}", member.label);
                    }
                    println!("    produces {}", team.produced_ingredients);
                }
                println!(
                    "  exhaustive: {}, nodes: {}, memo hits: {}\n",
                    result.exhaustive, result.stats.nodes, result.stats.memo_hits
                );
            }
            Err(e) => eprintln!("  Error: {}", e),
        }
    }

    println!("Memo entries: {}", solver.memo_len());
}

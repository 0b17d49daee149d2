//! Text rendering of solver output.

use std::io::{self, Write};
use teamcover_core::{Ingredient, IngredientVector, InvertedIndex, ProducerPool, SolveResult};

pub fn write_result(
    out: &mut impl Write,
    recipe: &IngredientVector,
    result: &SolveResult<'_>,
    max_team_size: usize,
) -> io::Result<()> {
    writeln!(out, "Recipe: {}", recipe)?;
    match result.team_size() {
        None if result.exhaustive => {
            writeln!(out, "  No team of up to {} members covers it", max_team_size)?
        }
        None => writeln!(out, "  No team found before the time limit")?,
        Some(size) => writeln!(
            out,
            "  {} team(s) of {} member(s){}",
            result.teams.len(),
            size,
            if result.exhaustive { "" } else { " (search timed out; may not be minimal)" }
        )?,
    }

    for (i, team) in result.teams.iter().enumerate() {
        writeln!(out, "  #{}", i + 1)?;
        for member in &team.members {
            writeln!(out, "    - {}", member.label)?;
        }
        writeln!(out, "    produces: {}", team.produced_ingredients)?;
        let surplus = team.surplus(recipe);
        if !surplus.is_zero() {
            writeln!(out, "    surplus:  {}", surplus)?;
        }
    }
    Ok(())
}

pub fn write_ingredients(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:>3}  {:<10} {:<20} {:>5}", "id", "key", "name", "value")?;
    for ingredient in Ingredient::ALL {
        writeln!(
            out,
            "{:>3}  {:<10} {:<20} {:>5}",
            ingredient.id(),
            ingredient.short_name(),
            ingredient.name(),
            ingredient.value()
        )?;
    }
    Ok(())
}

/// Per-ingredient supply: number of producers and the best single amount.
pub fn write_pool_summary(
    out: &mut impl Write,
    pool: &ProducerPool,
    index: &InvertedIndex,
) -> io::Result<()> {
    writeln!(out, "{} producer(s)", pool.len())?;
    for ingredient in Ingredient::ALL {
        let candidates = index.candidates(ingredient);
        if candidates.is_empty() {
            continue;
        }
        let best = candidates
            .iter()
            .map(|&idx| pool[idx].ingredients.get(ingredient))
            .max()
            .unwrap_or(0);
        writeln!(
            out,
            "  {:<10} {:>3} producer(s), best single amount {}",
            ingredient.short_name(),
            candidates.len(),
            best
        )?;
    }
    Ok(())
}

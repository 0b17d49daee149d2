use crate::cli::{SettingsArgs, SolveArgs};
use crate::error::CliError;
use crate::render;
use crate::settings::Settings;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use teamcover_core::{
    parse_recipe, IngredientVector, MemoCache, ProducerPool, SetCover, SolveResult, SolverConfig,
};
use tracing::info;

/// Read a producer pool from a JSON file
pub fn load_pool(path: &Path) -> Result<ProducerPool, CliError> {
    let json = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| CliError::PoolFormat {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Serialize)]
struct RecipeReport<'a> {
    recipe: IngredientVector,
    max_team_size: usize,
    #[serde(flatten)]
    result: SolveResult<'a>,
}

/// Solve every recipe in order on one solver, so later recipes reuse the
/// sub-problems cached by earlier ones.
pub fn solve(args: &SolveArgs, settings: &Settings, out: &mut impl Write) -> Result<(), CliError> {
    let recipes = args
        .recipes
        .iter()
        .map(|text| parse_recipe(text))
        .collect::<Result<Vec<_>, _>>()?;

    let max_team_size = args.max_team_size.unwrap_or(settings.max_team_size);
    let timeout = Duration::from_millis(args.timeout_ms.unwrap_or(settings.timeout_ms));
    let json = args.json || settings.json;

    let pool = load_pool(&args.pool)?;
    let index = pool.build_index();
    info!(producers = pool.len(), path = %args.pool.display(), "loaded pool");

    let mut memo = MemoCache::new();
    let mut solver =
        SetCover::with_config(&pool, &index, &mut memo, SolverConfig::with_timeout(timeout))?;

    let mut reports = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let result = solver.solve_recipe(&recipe, max_team_size)?;
        if json {
            reports.push(RecipeReport {
                recipe,
                max_team_size,
                result,
            });
        } else {
            render::write_result(out, &recipe, &result, max_team_size)?;
        }
    }
    info!(entries = solver.memo_len(), "memo cache size");

    if json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn check(pool_path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let pool = load_pool(pool_path)?;
    let index = pool.build_index();
    render::write_pool_summary(out, &pool, &index)?;
    Ok(())
}

/// Apply overrides to `current`; persist them when asked.
pub fn settings(
    args: &SettingsArgs,
    mut current: Settings,
    out: &mut impl Write,
) -> Result<Settings, CliError> {
    if let Some(max_team_size) = args.max_team_size {
        current.max_team_size = max_team_size;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        current.timeout_ms = timeout_ms;
    }
    if let Some(json) = args.json {
        current.json = json;
    }

    writeln!(out, "{}", serde_json::to_string_pretty(&current)?)?;
    if args.save {
        let path = current.save()?;
        writeln!(out, "saved to {}", path.display())?;
    }
    Ok(current)
}

//! Per-unit processing.
//!
//! Units are independent: each gets its own graph and deduplication table,
//! so they run in parallel. A unit's output is written only after its whole
//! pipeline succeeded; a failing unit leaves no file behind and does not
//! stop the others.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tydi_ir::RawGraph;
use tydi_resolve::{resolve, ResolveConfig};

use crate::units::Unit;
use crate::UnitError;

/// Result of processing one unit.
#[derive(Debug)]
pub struct Outcome {
    pub unit: String,
    /// Path of the written output.
    pub result: Result<PathBuf, UnitError>,
}

/// Resolve every unit and write `<output_dir>/<name>.json` for each success.
///
/// Uses a scoped pool so worker threads are torn down before returning,
/// falling back to sequential processing if the pool cannot be built.
pub fn run_units(units: &[Unit], output_dir: &Path, config: &ResolveConfig) -> Vec<Outcome> {
    rayon::ThreadPoolBuilder::new()
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| {
                units
                    .par_iter()
                    .map(|unit| run_one(unit, output_dir, config))
                    .collect::<Vec<_>>()
            })
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), running sequentially");
            units
                .iter()
                .map(|unit| run_one(unit, output_dir, config))
                .collect()
        })
}

fn run_one(unit: &Unit, output_dir: &Path, config: &ResolveConfig) -> Outcome {
    Outcome {
        unit: unit.name.clone(),
        result: run_unit(unit, output_dir, config),
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.name))]
fn run_unit(unit: &Unit, output_dir: &Path, config: &ResolveConfig) -> Result<PathBuf, UnitError> {
    let text = unit.read()?;
    let raw: RawGraph = serde_json::from_str(&text).map_err(|source| UnitError::Parse {
        unit: unit.name.clone(),
        source,
    })?;
    let resolved = resolve(&raw, config)?;
    let output = serde_json::to_string_pretty(&resolved).map_err(|source| UnitError::Encode {
        unit: unit.name.clone(),
        source,
    })?;

    let path = output_dir.join(format!("{}.json", unit.name));
    fs::write(&path, output).map_err(|source| UnitError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "unit written");
    Ok(path)
}

//! Input unit discovery.
//!
//! A unit is one JSON document produced by the front end. Inputs may be
//! files, a single directory (expanded to its `*.json` files) or, when no
//! input is named, standard input.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::UnitError;

/// Unit name used for a document read from standard input.
pub const STDIN_UNIT: &str = "tydi-system";

/// Where a unit's text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitSource {
    File(PathBuf),
    /// Text already read (standard input).
    Text(String),
}

/// One input unit, named after its file stem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub source: UnitSource,
}

impl Unit {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_stem()
            .map_or_else(|| STDIN_UNIT.to_owned(), |stem| stem.to_string_lossy().into_owned());
        Unit {
            name,
            source: UnitSource::File(path),
        }
    }

    /// The unit's JSON text.
    pub fn read(&self) -> Result<String, UnitError> {
        match &self.source {
            UnitSource::File(path) => fs::read_to_string(path).map_err(|source| UnitError::Read {
                path: path.clone(),
                source,
            }),
            UnitSource::Text(text) => Ok(text.clone()),
        }
    }
}

/// Expand the named inputs into units.
///
/// A single directory expands to its `*.json` files sorted by path; anything
/// else is taken as a list of files. Nothing named means standard input, if
/// it is not a terminal.
pub fn discover(inputs: &[PathBuf]) -> io::Result<Vec<Unit>> {
    match inputs {
        [] => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Ok(Vec::new());
            }
            let mut text = String::new();
            stdin.lock().read_to_string(&mut text)?;
            Ok(vec![Unit {
                name: STDIN_UNIT.to_owned(),
                source: UnitSource::Text(text),
            }])
        }
        [dir] if dir.is_dir() => discover_dir(dir),
        files => Ok(files.iter().cloned().map(Unit::from_path).collect()),
    }
}

fn discover_dir(dir: &Path) -> io::Result<Vec<Unit>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths.into_iter().map(Unit::from_path).collect())
}

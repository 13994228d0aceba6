//! Tydi resolution driver.
//!
//! Reads JSON units emitted by the front end, resolves each one
//! independently and writes the resolved graph as JSON for the renderer.

use std::path::PathBuf;
use std::sync::Once;

use thiserror::Error;
use tydi_resolve::ResolveError;

pub mod args;
pub mod runner;
pub mod units;

pub use args::{parse_args, print_usage, Options};
pub use runner::{run_units, Outcome};
pub use units::{discover, Unit, UnitSource};

/// Why a unit produced no output.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in unit `{unit}`: {source}")]
    Parse {
        unit: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("cannot encode unit `{unit}`: {source}")]
    Encode {
        unit: String,
        source: serde_json::Error,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl UnitError {
    /// Diagnostic code; I/O and JSON failures share the driver's own codes.
    pub fn code(&self) -> &'static str {
        match self {
            UnitError::Resolve(err) => err.code(),
            UnitError::Read { .. } | UnitError::Write { .. } => "R0100",
            UnitError::Parse { .. } | UnitError::Encode { .. } => "R0101",
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`. Does nothing when it is unset.
///
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

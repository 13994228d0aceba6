//! Command-line options.

use std::path::PathBuf;

use tydi_resolve::ResolveConfig;

/// Parsed invocation: `tydic [flags] <output_dir> [input...]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub output_dir: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub config: ResolveConfig,
}

/// Parse the arguments after the program name.
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut output_dir = None;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--no-auto-naming" => options.config.auto_name_streams = false,
            "--external-only" => options.config.external_only = true,
            flag if flag.starts_with('-') => return Err(format!("unknown option `{flag}`")),
            path if output_dir.is_none() => output_dir = Some(PathBuf::from(path)),
            path => options.inputs.push(PathBuf::from(path)),
        }
    }

    options.output_dir = output_dir.ok_or_else(|| "missing output directory".to_owned())?;
    Ok(Some(options))
}

pub fn print_usage() {
    eprintln!("Usage: tydic [options] <output_dir> [input.json | input_dir]...");
    eprintln!();
    eprintln!("Reads one unit from stdin when no input is given.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --no-auto-naming  Keep front-end names for anonymous streams");
    eprintln!("  --external-only   Ask the renderer to emit external streamlets only");
    eprintln!("  -h, --help        Show this message");
}

//! Tydi resolution CLI
//!
//! `tydic [options] <output_dir> [input...]`

use tydic::{discover, init_tracing, parse_args, print_usage, run_units};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    let units = match discover(&options.inputs) {
        Ok(units) => units,
        Err(e) => {
            eprintln!("error: cannot read input: {e}");
            std::process::exit(1);
        }
    };
    if units.is_empty() {
        eprintln!("error: no input units");
        eprintln!();
        print_usage();
        std::process::exit(1);
    }

    if let Err(e) = std::fs::create_dir_all(&options.output_dir) {
        eprintln!(
            "error: cannot create `{}`: {e}",
            options.output_dir.display()
        );
        std::process::exit(1);
    }

    let outcomes = run_units(&units, &options.output_dir, &options.config);
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => println!("{}: wrote {}", outcome.unit, path.display()),
            Err(err) => {
                failed += 1;
                eprintln!("error[{}]: {}: {err}", err.code(), outcome.unit);
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} units failed", outcomes.len());
        std::process::exit(1);
    }
}

//! Shared test utilities for phase tests.

use brewin_eval::{buffer_handler, scripted_handler, LanguageLevel};
use brewinc::commands::{run_source, RunError, RunOptions};

/// Output of a run plus how it ended.
pub struct Run {
    pub output: String,
    pub result: Result<(), RunError>,
}

/// Run `source` at `level` with scripted stdin.
pub fn run(level: LanguageLevel, source: &str, input: &[&str]) -> Run {
    run_with(
        &RunOptions {
            level,
            max_depth: None,
        },
        source,
        input,
    )
}

pub fn run_with(options: &RunOptions, source: &str, input: &[&str]) -> Run {
    let output = buffer_handler();
    let result = run_source(
        source,
        options,
        output.clone(),
        scripted_handler(input.iter().copied()),
    );
    Run {
        output: output.get_output(),
        result,
    }
}

/// Read a program from `tests/programs/`.
pub fn program(name: &str) -> String {
    let path = format!("{}/tests/programs/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

pub(crate) mod explain;
pub(crate) mod rule;

use std::path::Path;

use provex_engine::MemoryProgram;

use crate::{fail, OutputFormat};

/// Read and load a program JSON file, exiting on failure.
pub(crate) fn load_program(path: &Path, output: OutputFormat, quiet: bool) -> MemoryProgram {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => fail(
            &format!("error: program file not found: {}", path.display()),
            output,
            quiet,
        ),
    };

    match MemoryProgram::from_json_str(&text) {
        Ok(p) => p,
        Err(e) => fail(
            &format!("error: invalid program {}: {}", path.display(), e),
            output,
            quiet,
        ),
    }
}

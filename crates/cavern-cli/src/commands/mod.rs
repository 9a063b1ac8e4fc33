pub mod check;
pub mod inspect;
pub mod play;

use std::path::Path;

use cavern_dsl::{CompileError, render_diagnostics};
use cavern_engine::Adventure;

/// Compile a script file and print diagnostics.
/// Returns the adventure if it compiled.
fn compile_file(path: &Path) -> Result<Adventure, String> {
    cavern_dsl::compile_file(path).map_err(|err| report(path, &err))
}

/// Print a compile error to stderr using ariadne and summarize it.
fn report(path: &Path, err: &CompileError) -> String {
    let diagnostics = err.diagnostics();
    if diagnostics.is_empty() {
        return err.to_string();
    }

    // The file was readable a moment ago; render without context if not.
    let source = std::fs::read_to_string(path).unwrap_or_default();
    let filename = path.display().to_string();
    eprint!("{}", render_diagnostics(&source, &filename, &diagnostics));

    match err {
        CompileError::Syntax { .. } => err.to_string(),
        _ => format!(
            "compilation failed with {} error{}",
            diagnostics.len(),
            if diagnostics.len() == 1 { "" } else { "s" },
        ),
    }
}

//! tpx - Command-line tool for encoding, composing and previewing trait pixel art

use std::process::ExitCode;

use traitpx::cli;

fn main() -> ExitCode {
    cli::run()
}

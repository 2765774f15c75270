//! Short binary name (`pk`) that forwards to the `parakeet` library.
//! Keeping the alias as a real binary avoids shell alias requirements.

use std::process::ExitCode;

fn main() -> ExitCode {
    match parakeet::entry() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

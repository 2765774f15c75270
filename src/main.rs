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

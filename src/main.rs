use std::process::ExitCode;

fn main() -> ExitCode {
    match timebar::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("timebar: {e}");
            ExitCode::FAILURE
        }
    }
}

use std::process::ExitCode;

use trellocli::ui::output;

fn main() -> ExitCode {
    match trellocli::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

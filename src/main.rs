use std::process::ExitCode;

use kryptos::ui::output;

fn main() -> ExitCode {
    match kryptos::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

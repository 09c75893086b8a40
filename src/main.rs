#![forbid(unsafe_code)]

use std::process::ExitCode;

use check_nextcloud::cli::{self, Invocation};
use check_nextcloud::{check, logging, output};

fn main() -> ExitCode {
    let settings = match cli::parse_args() {
        Ok(Invocation::Run(settings)) => settings,
        Ok(Invocation::Print(text)) => {
            print!("{}", text);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            // The supervisor only reads stdout
            println!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    logging::init(settings.verbose);

    match check::execute(&settings) {
        Ok(result) => {
            println!("{}", output::render(&result));
            ExitCode::from(result.severity.exit_code())
        }
        Err(err) => {
            println!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

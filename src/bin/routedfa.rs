use routedfa::cli::run_cli;
use routedfa::logging::{init_logging, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let guard = match init_logging(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = run_cli();
    // flush buffered log lines before printing the final error
    drop(guard);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

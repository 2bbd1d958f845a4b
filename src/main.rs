//! pricetag - Colored tags for files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = pricetag::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

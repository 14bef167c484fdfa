// src/main.rs

use siteflow::errors::SiteflowError;
use siteflow::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("siteflow: failed to initialise logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(args).await {
        eprintln!("siteflow error: {err}");
        // Propagate a failing tool's exit code where available.
        let code = match &err {
            SiteflowError::ProcessFailure { exit_code, .. } if *exit_code > 0 => *exit_code,
            _ => 1,
        };
        std::process::exit(code);
    }
}

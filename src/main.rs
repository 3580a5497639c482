mod config;
mod logging;
mod prober;
mod report;
mod timestamp;
mod util;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use config::Cli;
use logging::Logger;

const LOG_FILE: &str = "port_checker.log";
const USAGE_EXIT_CODE: u8 = 1;
const STRICT_FAILURE_EXIT_CODE: u8 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let Some(target) = cli.target()? else {
        Cli::print_usage().context("writing usage")?;
        return Ok(ExitCode::from(USAGE_EXIT_CODE));
    };

    let logger = Logger::init(LOG_FILE, cli.tracing_level())?;
    let open = {
        let _scope = logger.set_default();
        debug!(
            "probing {}:{} with timeout {:?}",
            target.host, target.port, target.timeout
        );
        let result = prober::run(&target).await;
        report::report(&target, &result);
        result.outcome.is_open()
    };
    logger.shutdown();

    if cli.strict && !open {
        return Ok(ExitCode::from(STRICT_FAILURE_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

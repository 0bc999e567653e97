//! Rebuild cached reaction counters from the reaction records
//!
//! ```bash
//! engage-recount            # dry-run: report what would change
//! engage-recount --write    # apply (or RECOUNT_EXECUTE=true)
//! ```

use std::process::ExitCode;

use clap::Parser;
use engage_service::ReconciliationJob;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Recount cached reaction counters")]
struct Args {
    /// Write the corrected counters instead of only reporting them
    #[arg(long, alias = "execute")]
    write: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = format!("{e:#}"), "Recount failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = engage_jobs::init("recount")?;
    let dry_run = !(args.write || config.recount.execute);

    let stores = engage_jobs::connect(&config).await?;
    let job = ReconciliationJob::new(stores.reactions, stores.contents)
        .with_cancel_flag(engage_jobs::cancel_on_ctrl_c());

    if dry_run {
        info!("Dry run: no counters will be written (pass --write to apply)");
    }

    let report = job.run(dry_run).await?;

    info!(
        report = %serde_json::to_string(&report)?,
        "Recount report"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_flag_and_alias() {
        assert!(!Args::try_parse_from(["engage-recount"]).unwrap().write);
        assert!(Args::try_parse_from(["engage-recount", "--write"]).unwrap().write);
        assert!(Args::try_parse_from(["engage-recount", "--execute"]).unwrap().write);
    }
}

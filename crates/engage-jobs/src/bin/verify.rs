//! Report drift between cached reaction counters and the reaction records
//!
//! Exits with status 1 when any drift is found or the run was interrupted.
//!
//! ```bash
//! engage-verify --content-type=post --limit=1000
//! ```

use std::process::ExitCode;

use clap::Parser;
use engage_core::ContentKind;
use engage_service::{VerificationJob, VerificationReport};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Verify cached reaction counters")]
struct Args {
    /// Only check this content type
    #[arg(long = "content-type", alias = "contentType", value_parser = engage_jobs::parse_content_kind)]
    content_type: Option<ContentKind>,

    /// Compare at most this many grouped ids per content type
    #[arg(long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(report) if succeeded(&report) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = format!("{e:#}"), "Verification failed");
            ExitCode::FAILURE
        }
    }
}

/// An interrupted run proves nothing about the kinds it skipped
fn succeeded(report: &VerificationReport) -> bool {
    if report.cancelled {
        warn!(
            checked_kinds = report.kinds.len(),
            "Verification interrupted before every kind was checked"
        );
    }
    report.passed()
}

async fn run(args: Args) -> anyhow::Result<VerificationReport> {
    let config = engage_jobs::init("verify")?;

    let stores = engage_jobs::connect(&config).await?;
    let job = VerificationJob::new(stores.reactions, stores.contents)
        .with_sample_size(config.verify.sample_size)
        .with_cancel_flag(engage_jobs::cancel_on_ctrl_c());

    let report = job.run(args.content_type, args.limit).await?;

    for example in &report.examples {
        warn!(
            kind = %example.kind,
            id = %example.id,
            cached = example.cached,
            actual = example.actual,
            "Drifted counter"
        );
    }

    info!(
        report = %serde_json::to_string(&report)?,
        "Verification report"
    );

    Ok(report)
}

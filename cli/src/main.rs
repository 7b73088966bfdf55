mod args;
mod input;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use args::CommandLine;
use danglr_common::error::FatalError;
use danglr_core::liveness::PingProbe;
use danglr_core::pipeline::Pipeline;
use danglr_core::probe::WebProbe;
use danglr_core::ranges::{AddressRangeTable, PROVIDER_RANGES_URL};
use danglr_core::report::Reporter;
use danglr_core::resolver::DnsResolver;
use terminal::logging;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let candidates = match input::read_candidates(commands.domains.clone())? {
        Some(candidates) => candidates,
        None => {
            error!("no input: pipe domains in or pass them as an argument");
            eprintln!("usage: cat domains.txt | danglr [-c N] [-t MS] [-p]");
            std::process::exit(2);
        }
    };

    let cfg = commands.to_config();

    let ranges = AddressRangeTable::load(PROVIDER_RANGES_URL)
        .await
        .map_err(|err| FatalError::RangeLoad(err.into()))?;

    let http = WebProbe::new(cfg.http_timeout).context("setting up HTTP probe")?;

    let pipeline = Pipeline::new(
        cfg,
        Arc::new(ranges),
        Arc::new(DnsResolver::new()),
        Arc::new(PingProbe),
        Arc::new(http),
    );

    pipeline.run(candidates, Reporter::stdout()).await;
    Ok(())
}

mod cli;
mod console;
mod logging;

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use haml2erb_engine::{run, ConvertSettings, Haml2ErbConverter, PipelineConfig};

use crate::cli::{confirm_removal, Cli};
use crate::console::ConsoleSink;
use crate::logging::LogDestination;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(LogDestination::File);

    let stdin = io::stdin();
    let remove_sources = confirm_removal(&mut stdin.lock(), &mut io::stdout())
        .context("reading removal confirmation")?;

    let mut config = PipelineConfig::new(cli.root);
    config.remove_sources = remove_sources;

    let converter = Arc::new(
        Haml2ErbConverter::new(ConvertSettings::default()).context("building http client")?,
    );
    let progress = Arc::new(ConsoleSink);

    let runtime = tokio::runtime::Runtime::new().context("building tokio runtime")?;
    let summary = runtime.block_on(run(&config, converter, progress))?;

    println!("DONE");
    log::info!(
        "converted {} of {} files ({} unprocessable, {} failed)",
        summary.converted,
        summary.discovered,
        summary.unprocessable,
        summary.failed
    );
    Ok(())
}

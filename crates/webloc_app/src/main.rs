use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use webloc_app::cli::Cli;
use webloc_app::{logging, output};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log_level(), cli.log_file.as_deref());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let report = runtime.block_on(webloc_app::run(&cli))?;

    print!("{}", output::render_summary(&report, Utc::now()));
    Ok(())
}

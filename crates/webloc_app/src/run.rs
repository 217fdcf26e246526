use std::io;

use anyhow::{bail, Context, Result};
use engine_logging::{engine_error, engine_info};
use webloc_core::RunReport;
use webloc_engine::{
    scan_shortcuts, write_remediation_script, write_report_json, AlwaysProceed,
    BatchRetryProcessor, ConfirmationGate, NamingStrategy, OpenRouterSimplifier, Pipeline,
    PipelineSettings, PlistShortcutStore, ReqwestTitleFetcher, StdFileSystem, TitleResolver,
};

use crate::cli::Cli;
use crate::config::{self, AppConfig};
use crate::confirm;

/// Scans the directory, runs the pipeline and writes the requested outputs.
///
/// Only setup problems are errors; per-record failures end up in the report.
pub async fn run(cli: &Cli) -> Result<RunReport> {
    let mut config = config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let inputs = scan_shortcuts(&cli.directory, &PlistShortcutStore)
        .with_context(|| format!("cannot scan {}", cli.directory.display()))?;
    engine_info!("found {} shortcuts under {}", inputs.len(), cli.directory.display());

    let settings = PipelineSettings {
        dry_run: cli.dry_run,
        remove_duplicates: config.remove_duplicates,
    };
    let fs = StdFileSystem;
    let mut gate: Box<dyn ConfirmationGate> = if cli.yes {
        Box::new(AlwaysProceed)
    } else {
        Box::new(confirm::stdin_gate())
    };

    let output = match NamingStrategy::from(cli.strategy) {
        NamingStrategy::Direct => {
            let fetcher = ReqwestTitleFetcher::new(config.fetch_settings())?;
            let pipeline = Pipeline::new(settings, TitleResolver::direct(&fetcher), &fs);
            pipeline.run(inputs, gate.as_mut()).await
        }
        NamingStrategy::Batch => {
            let api_key = resolve_api_key(cli, &config)?;
            let service = OpenRouterSimplifier::new(config.service_settings(api_key))?;
            let processor = BatchRetryProcessor::new(&service, config.batch_policy());
            let pipeline = Pipeline::new(settings, TitleResolver::batch(processor), &fs);
            pipeline.run(inputs, gate.as_mut()).await
        }
    };

    write_outputs(cli, &output.report);
    Ok(output.report)
}

fn write_outputs(cli: &Cli, report: &RunReport) {
    if let Some(path) = &cli.report_json {
        match write_report_json(path, report) {
            Ok(path) => engine_info!("report written to {}", path.display()),
            Err(err) => engine_error!("could not write report to {}: {}", path.display(), err),
        }
    }
    if let Some(path) = &cli.remediation_script {
        match write_remediation_script(path, &report.remediation_paths()) {
            Ok(path) => engine_info!("remediation script written to {}", path.display()),
            Err(err) => engine_error!("could not write script to {}: {}", path.display(), err),
        }
    }
}

fn resolve_api_key(cli: &Cli, config: &AppConfig) -> Result<String> {
    let key = match pick_api_key(cli.api_key.as_deref(), config.api_key.as_deref()) {
        Some(key) => key,
        None => confirm::prompt_api_key(io::stdin().lock(), io::stdout())?,
    };
    if key.is_empty() {
        bail!("the batch strategy needs an API key (--api-key, OPENROUTER_API_KEY or config)");
    }
    Ok(key)
}

/// Command line (or environment) first, then the config file.
pub fn pick_api_key(from_cli: Option<&str>, from_config: Option<&str>) -> Option<String> {
    [from_cli, from_config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
}

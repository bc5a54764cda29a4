use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::args::RunnerArgs;
use crate::config::{self, BenchmarkConfig};
use crate::error::{AppError, AppResult, ConfigError};
use crate::output::{Benchmark, export};
use crate::runner::Requester;
use crate::shutdown::StopCause;

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["volley.toml", "volley.json"];

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose);

    let config = resolve_config(args, &matches)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config))
}

fn parse_args() -> AppResult<Option<(RunnerArgs, ArgMatches)>> {
    let mut cmd = RunnerArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = RunnerArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

/// An invocation with no arguments and no default config file nearby has
/// nothing to run against, so it prints help instead of an error.
fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn resolve_config(mut args: RunnerArgs, matches: &ArgMatches) -> AppResult<BenchmarkConfig> {
    let file = config::load_config(args.config.as_deref())?;
    let mut template = None;
    if let Some(file) = file.as_ref() {
        template = file
            .output
            .as_ref()
            .and_then(|output| output.template.clone());
        config::apply_config(&mut args, matches, file).map_err(AppError::config)?;
    }
    if args.url.is_none() {
        return Err(AppError::config(ConfigError::MissingUrl));
    }
    config::build_benchmark_config(&args, template).map_err(AppError::config)
}

async fn run_async(config: BenchmarkConfig) -> AppResult<()> {
    info!(
        url = %config.request.url,
        concurrency = config.runner.concurrency,
        requests = config.runner.requests,
        "starting benchmark"
    );

    let requester = Requester::new(config.clone());

    let shutdown_tx = requester.shutdown_sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            drop(shutdown_tx.send(StopCause::Canceled));
        }
    });

    let report = requester.run().await.map_err(AppError::Run)?;
    info!(
        length = report.length,
        fail = report.fail,
        "benchmark finished"
    );

    let benchmark = Benchmark::new(report, config);
    export(&benchmark).await.map_err(AppError::Export)?;

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod output;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<ExitCode> {
    let args = RootArgs::parse();
    let verbose = match &args.command {
        Command::Preview(args) => args.common.verbose,
        Command::Send(args) => args.common.verbose,
        Command::Rows(args) => args.common.verbose,
        Command::InitConfig(_) => false,
    };
    init_tracing(verbose);

    match args.command {
        Command::Preview(args) => workflow::run_preview(args),
        Command::Send(args) => workflow::run_send(args),
        Command::Rows(args) => workflow::run_rows(args),
        Command::InitConfig(args) => workflow::run_init_config(args),
    }
}

/// Logs go to stderr so stdout stays parseable with `--json`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,messo=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

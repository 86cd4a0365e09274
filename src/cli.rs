//! CLI argument parsing for the messo commands.
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "messo",
    version,
    about = "Compose and send order SMS messages from spreadsheet rows",
    after_help = "Commands:\n  preview <input>       Validate a row and print the SMS it would produce\n  send <input>          Validate, compose, and dispatch to every agent phone\n  rows --file <csv>     List rows of a CSV export with their validity\n  init-config --out <path>  Write a default config file\n\nInputs (exactly one):\n  --query RAW           Raw query string (NAME=...&PHONE=... or csv=...)\n  --csv BLOB            Header line plus one data line (pipe or comma)\n  --field KEY=VALUE     One field; repeat for more\n  --index N             Row N of --file (or the configured data CSV)\n  --order-number X      First row of --file whose order number is X\n\nExamples:\n  messo preview --csv $'NAME|PHONE|AMOUNT\\nAsha|0700000000|100'\n  messo preview --query 'NAME=Asha&AMOUNT=100&debug=1' --json\n  messo send --file orders.csv --index 3 --outbox /tmp/outbox.jsonl\n  messo rows --file orders.csv --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Preview(PreviewArgs),
    Send(SendArgs),
    Rows(RowsArgs),
    InitConfig(InitConfigArgs),
}

/// Options shared by every command that reads config.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// JSON config file (defaults plus MESSO_* environment otherwise)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit debug logs for the messo crate on stderr
    #[arg(long)]
    pub verbose: bool,
}

/// Where the row comes from.
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["query", "csv", "field", "index", "order_number"])
))]
pub struct InputArgs {
    /// Raw query string, with or without a leading `?`
    #[arg(long, value_name = "RAW")]
    pub query: Option<String>,

    /// Delimited blob: a header line and one data line
    #[arg(long, value_name = "BLOB")]
    pub csv: Option<String>,

    /// A single KEY=VALUE field
    #[arg(long, value_name = "KEY=VALUE", value_parser = parse_field)]
    pub field: Vec<(String, String)>,

    /// 1-based row index in the CSV file
    #[arg(long, value_name = "N")]
    pub index: Option<usize>,

    /// Order number to look up in the CSV file
    #[arg(long, value_name = "X")]
    pub order_number: Option<String>,

    /// CSV export used with --index/--order-number
    #[arg(long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Include field detection diagnostics
    #[arg(long)]
    pub debug: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Validate a row and print the SMS it would produce")]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Compose the SMS and dispatch it to every agent phone")]
pub struct SendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Outbox file receiving one JSON line per message (overrides config)
    #[arg(long, value_name = "PATH")]
    pub outbox: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "List the rows of a CSV export with their validity")]
pub struct RowsArgs {
    /// CSV export (defaults to the configured data CSV)
    #[arg(long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Write a default config file")]
pub struct InitConfigArgs {
    /// Destination path for the config JSON
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.trim().is_empty() {
        return Err(format!("empty field name in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

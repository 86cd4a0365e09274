//! Command runners: resolve a row, compose, and report.
use crate::cli::{CommonArgs, InitConfigArgs, InputArgs, PreviewArgs, RowsArgs, SendArgs};
use crate::output::{
    print_json, render_row_report, render_rows, render_send_report, RowListing, RowReport,
    RowStatus, SendReport,
};
use anyhow::{anyhow, Result};
use messo::config::{default_config, load_config, write_config, Config, ENV_DATA_CSV};
use messo::diagnostics::{detect_fields, sanitized_entries};
use messo::dispatch::{dispatch_all, OutboxDispatcher};
use messo::parse::{row_from_delimited, row_from_query, row_from_query_params, MalformedInput};
use messo::resolve;
use messo::util::display_path;
use messo::{compose, validate, ComposedSms, Row, RowStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Row read from the command line, before composing.
struct ResolvedInput {
    source: String,
    debug: bool,
    row: Result<Row, MalformedInput>,
}

pub fn run_preview(args: PreviewArgs) -> Result<ExitCode> {
    let config = load(&args.common)?;
    let (report, _) = compose_report(&args.input, &config)?;
    if args.json {
        print_json(&report, "preview report")?;
    } else {
        print!("{}", render_row_report(&report));
    }
    Ok(exit_code(report.status == RowStatus::Valid))
}

pub fn run_send(args: SendArgs) -> Result<ExitCode> {
    let mut config = load(&args.common)?;
    if let Some(outbox) = args.outbox.clone() {
        config.outbox_path = outbox;
    }
    let (row_report, composed) = compose_report(&args.input, &config)?;

    let mut report = SendReport {
        row: row_report,
        outbox: None,
        receipts: Vec::new(),
    };
    if let Some(composed) = composed {
        let mut dispatcher =
            OutboxDispatcher::new(config.outbox_path.clone(), config.sender_id.clone());
        report.receipts = dispatch_all(&mut dispatcher, &composed, &config.policy());
        let cwd = std::env::current_dir().ok();
        report.outbox = Some(display_path(dispatcher.path(), cwd.as_deref()));
    }

    let success = report.row.status == RowStatus::Valid
        && !report.receipts.is_empty()
        && report.receipts.iter().all(|receipt| receipt.success);
    if args.json {
        print_json(&report, "send report")?;
    } else {
        print!("{}", render_send_report(&report));
    }
    Ok(exit_code(success))
}

pub fn run_rows(args: RowsArgs) -> Result<ExitCode> {
    let config = load(&args.common)?;
    let path = data_csv(args.file.as_deref(), &config)?;
    let store = RowStore::from_path(&path)?;
    let rows: Vec<RowListing> = store
        .iter()
        .map(|(index, row)| {
            let report = validate(row);
            RowListing {
                index,
                order_number: resolve::ORDER_NUMBER.resolve(row),
                valid: report.is_valid(),
                missing: report.missing,
            }
        })
        .collect();
    if args.json {
        print_json(&rows, "row listing")?;
    } else {
        print!("{}", render_rows(&rows));
    }
    Ok(ExitCode::SUCCESS)
}

pub fn run_init_config(args: InitConfigArgs) -> Result<ExitCode> {
    if args.out.exists() && !args.force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            args.out.display()
        ));
    }
    write_config(&args.out, &default_config())?;
    println!("wrote {}", args.out.display());
    Ok(ExitCode::SUCCESS)
}

fn load(common: &CommonArgs) -> Result<Config> {
    load_config(common.config.as_deref())
}

/// Resolve the input and compose it, returning the report and, when the row
/// is valid, the composed message.
fn compose_report(input: &InputArgs, config: &Config) -> Result<(RowReport, Option<ComposedSms>)> {
    let resolved = resolve_input(input, config)?;
    let mut report = RowReport {
        source: resolved.source,
        status: RowStatus::Malformed,
        error: None,
        missing: Vec::new(),
        recipients: Vec::new(),
        message: None,
        debug: None,
    };

    let row = match resolved.row {
        Ok(row) => row,
        Err(err) => {
            tracing::info!(source = %report.source, error = %err, "input rejected");
            report.error = Some(err.to_string());
            return Ok((report, None));
        }
    };
    if resolved.debug {
        report.debug = Some(detect_fields(&row));
    }
    tracing::debug!(entries = ?sanitized_entries(&row), "resolved row");

    match compose(&row, &config.policy()) {
        Ok(composed) => {
            report.status = RowStatus::Valid;
            report.recipients = composed.recipients.clone();
            report.message = Some(composed.body.clone());
            Ok((report, Some(composed)))
        }
        Err(validation) => {
            report.status = RowStatus::Invalid;
            report.missing = validation.missing;
            Ok((report, None))
        }
    }
}

fn resolve_input(input: &InputArgs, config: &Config) -> Result<ResolvedInput> {
    if let Some(raw) = input.query.as_deref() {
        let parsed = row_from_query(raw);
        return Ok(ResolvedInput {
            source: "query".to_string(),
            debug: input.debug || parsed.debug,
            row: parsed.row,
        });
    }
    if let Some(blob) = input.csv.as_deref() {
        return Ok(ResolvedInput {
            source: "csv".to_string(),
            debug: input.debug,
            row: row_from_delimited(blob).ok_or(MalformedInput::InvalidDelimited),
        });
    }
    if !input.field.is_empty() {
        let fields = input.field.iter().map(|(k, v)| (k.as_str(), v.as_str()));
        let parsed = row_from_query_params(fields);
        let row = if parsed.row.is_empty() {
            Err(MalformedInput::NoData)
        } else {
            Ok(parsed.row)
        };
        return Ok(ResolvedInput {
            source: "fields".to_string(),
            debug: input.debug || parsed.debug,
            row,
        });
    }

    let path = data_csv(input.file.as_deref(), config)?;
    let store = RowStore::from_path(&path)?;
    let (index, row) = if let Some(index) = input.index {
        let row = store.get(index).ok_or_else(|| {
            anyhow!("no row {index} in {} ({} rows)", path.display(), store.len())
        })?;
        (index, row)
    } else if let Some(order_number) = input.order_number.as_deref() {
        store.find_by_order_number(order_number).ok_or_else(|| {
            anyhow!(
                "no row with order number {:?} in {}",
                order_number.trim(),
                path.display()
            )
        })?
    } else {
        return Err(anyhow!("no input given"));
    };
    Ok(ResolvedInput {
        source: format!("{} row {index}", path.display()),
        debug: input.debug,
        row: Ok(row.clone()),
    })
}

fn data_csv(file: Option<&Path>, config: &Config) -> Result<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| config.data_csv.clone())
        .ok_or_else(|| {
            anyhow!(
                "no CSV file; pass --file or set data_csv ({})",
                ENV_DATA_CSV
            )
        })
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

mod common;

use common::{run_messo, stderr, stdout, ORDERS_CSV};
use serde_json::Value;

#[test]
fn preview_prints_message_for_delimited_blob() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = run_messo(
        dir.path(),
        &[
            "preview",
            "--csv",
            "NAME|PHONE|PRODUCT NAME|AMOUNT|CITY|AGENT PHONE\nAsha|712345678|Shoes|20000|Dar|0700000001",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("status: valid"));
    assert!(text.contains("recipients: 0700000001"));
    assert!(text.contains("message:\n  -\n  Asha\n  0712345678\n  Shoes\n  20000\n  Dar\n"));
}

#[test]
fn preview_reports_missing_fields_and_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = run_messo(
        dir.path(),
        &["preview", "--json", "--field", "NAME=Asha", "--field", "PHONE=0712345678"],
    );
    assert!(!output.status.success());
    let report: Value = serde_json::from_str(&stdout(&output)).expect("parse report");
    assert_eq!(report["status"], "invalid");
    let missing: Vec<&str> = report["missing"]
        .as_array()
        .expect("missing list")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(missing, vec!["PRODUCT NAME", "AMOUNT", "AGENT PHONE"]);
    assert!(report.get("message").is_none());
}

#[test]
fn preview_rejects_incomplete_blob() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = run_messo(dir.path(), &["preview", "--csv", "NAME,CITY"]);
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("status: malformed"));
    assert!(text.contains("Invalid or incomplete CSV"));
}

#[test]
fn query_debug_flag_adds_field_diagnostics() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = run_messo(
        dir.path(),
        &[
            "preview",
            "--json",
            "--query",
            "?NAME=Asha&Agent_Phone=255700000001&debug=1",
        ],
    );
    assert!(!output.status.success());
    let report: Value = serde_json::from_str(&stdout(&output)).expect("parse report");
    assert_eq!(report["source"], "query");
    assert_eq!(report["debug"]["detected"]["name"], true);
    assert_eq!(report["debug"]["detected"]["amount"], false);
    assert_eq!(report["debug"]["sample"]["agent phone"], "...0001");
    assert_eq!(report["debug"]["keys"], serde_json::json!(["agent phone", "name"]));
}

#[test]
fn send_appends_one_outbox_line_per_agent_phone() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("orders.csv"), ORDERS_CSV).expect("write csv");
    let output = run_messo(
        dir.path(),
        &[
            "send",
            "--file",
            "orders.csv",
            "--order-number",
            "OD1",
            "--outbox",
            "out/outbox.jsonl",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("  - 255700000001: ok"));
    assert!(text.contains("  - 255700000002: ok"));

    let outbox = std::fs::read_to_string(dir.path().join("out/outbox.jsonl")).expect("outbox");
    let records: Vec<Value> = outbox
        .lines()
        .map(|line| serde_json::from_str(line).expect("parse outbox line"))
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["msisdn"], "255700000001");
    assert_eq!(records[1]["msisdn"], "255700000002");
    assert_eq!(
        records[0]["body"],
        "Oda Namba OD1\nAsha\n0712345678\nShoes\n20000\nMlimani, Dar"
    );
}

#[test]
fn send_does_not_dispatch_invalid_rows() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("orders.csv"), ORDERS_CSV).expect("write csv");
    let output = run_messo(
        dir.path(),
        &[
            "send",
            "--file",
            "orders.csv",
            "--index",
            "2",
            "--outbox",
            "outbox.jsonl",
        ],
    );
    assert!(!output.status.success());
    assert!(stdout(&output)
        .contains("missing: AMOUNT, AGENT PHONE, PHONE or ALT NO (at least one)"));
    assert!(!dir.path().join("outbox.jsonl").exists());
}

#[test]
fn unknown_row_index_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("orders.csv"), ORDERS_CSV).expect("write csv");
    let output = run_messo(
        dir.path(),
        &["preview", "--file", "orders.csv", "--index", "9"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no row 9"));
}

#[test]
fn rows_lists_validity_from_configured_csv() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join("orders.csv"), ORDERS_CSV).expect("write csv");
    std::fs::write(
        dir.path().join("messo.json"),
        r#"{"data_csv": "orders.csv"}"#,
    )
    .expect("write config");
    let output = run_messo(dir.path(), &["rows", "--config", "messo.json", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let rows: Value = serde_json::from_str(&stdout(&output)).expect("parse rows");
    assert_eq!(rows[0]["index"], 1);
    assert_eq!(rows[0]["order_number"], "OD1");
    assert_eq!(rows[0]["valid"], true);
    assert_eq!(rows[1]["valid"], false);
    assert_eq!(
        rows[1]["missing"],
        serde_json::json!(["AMOUNT", "AGENT PHONE", "PHONE or ALT NO (at least one)"])
    );
}

#[test]
fn init_config_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = run_messo(dir.path(), &["init-config", "--out", "messo.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let config: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("messo.json")).expect("read config"),
    )
    .expect("parse config");
    assert_eq!(config["country_code"], "255");

    let output = run_messo(dir.path(), &["init-config", "--out", "messo.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));

    let output = run_messo(dir.path(), &["init-config", "--out", "messo.json", "--force"]);
    assert!(output.status.success());
}

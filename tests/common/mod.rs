//! Shared helpers for CLI integration tests.

use std::path::Path;
use std::process::{Command, Output};

const MESSO_ENV: [&str; 5] = [
    "MESSO_COUNTRY_CODE",
    "MESSO_RECOGNIZED_CODES",
    "MESSO_OUTBOX",
    "MESSO_DATA_CSV",
    "MESSO_SENDER_ID",
];

/// Sheet export used across tests: one complete row, one missing fields.
pub const ORDERS_CSV: &str = "ORDER NUMBER,NAME,PHONE,PRODUCT NAME,AMOUNT,ADDRESS,CITY,AGENT_PHONE\n\
OD1,Asha,0712345678,Shoes,20000,Mlimani,Dar,255700000001/255700000002\n\
OD2,Juma,,Bag,,,,\n";

/// Run the built binary inside `dir` with a clean messo environment.
pub fn run_messo(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_messo"));
    cmd.current_dir(dir).args(args).env_remove("RUST_LOG");
    for name in MESSO_ENV {
        cmd.env_remove(name);
    }
    cmd.output().expect("run messo")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn gp() -> Command {
    cargo_bin_cmd!("greenpoint")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_greenpoint.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_greenpoint_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh database: schema plus the welcome bonus.
pub fn init_db(db_path: &str) {
    gp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh database with one charger and one service registered.
///
/// - `ch1`: DC fast CCS charger, 08:00-22:00, 60 minute slots, paid
/// - `sv1`: battery diagnostic service, 09:00-17:00 with a 12:00-13:00 break
pub fn init_db_with_resources(db_path: &str) {
    init_db(db_path);

    gp().args([
        "--db",
        db_path,
        "resource",
        "add",
        "ch1",
        "--name",
        "Downtown Fast Charger",
        "--kind",
        "charger",
        "--open",
        "08:00",
        "--close",
        "22:00",
        "--duration",
        "60",
        "--type",
        "dc-fast",
        "--connector",
        "ccs",
        "--price",
        "0.45",
    ])
    .assert()
    .success();

    gp().args([
        "--db",
        db_path,
        "resource",
        "add",
        "sv1",
        "--name",
        "Battery Diagnostic",
        "--kind",
        "service",
        "--open",
        "09:00",
        "--close",
        "17:00",
        "--break-start",
        "12:00",
        "--break-end",
        "13:00",
        "--duration",
        "60",
        "--free",
    ])
    .assert()
    .success();
}

#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use rjobcost::db::{DbPool, JobStore};

pub fn rjc() -> Command {
    cargo_bin_cmd!("rjobcost")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rjobcost.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rjobcost_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Init the DB and create job 1 ("Smith garage", 40 h estimate) with one
/// component (1, "Framing") and one user (1, "Alice").
pub fn init_db_with_job(db_path: &str) {
    rjc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for args in [
        vec!["job", "add", "Smith garage", "--estimate", "40"],
        vec!["component", "add", "1", "Framing"],
        vec!["user", "add", "Alice"],
    ] {
        rjc()
            .args(["--db", db_path, "--role", "office", "--user", "1"])
            .args(args)
            .assert()
            .success();
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// In-memory store with job 1 "Smith garage", component 1 "Framing" and
/// user 1 "Alice".
pub fn memory_store() -> DbPool {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    pool.insert_job("Smith garage", None).expect("job");
    pool.insert_component(1, "Framing", false).expect("component");
    pool.insert_user("Alice").expect("user");
    pool
}

use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_job, rjc, setup_test_db, temp_out};

fn add_entries(db: &str) {
    rjc()
        .args([
            "--db",
            db,
            "entry",
            "add",
            "1",
            "--component",
            "1",
            "--start",
            "2025-03-10 07:00",
            "--end",
            "2025-03-10 15:00",
            "--crew",
            "3",
        ])
        .assert()
        .success()
        .stdout(contains("24.00 man-hours"));

    rjc()
        .args([
            "--db",
            db,
            "entry",
            "add",
            "1",
            "--start",
            "2025-03-10 15:00",
            "--end",
            "2025-03-10 19:00",
            "--worker",
            "Bob",
            "--worker",
            "Carl",
        ])
        .assert()
        .success()
        .stdout(contains("8.00 man-hours"));
}

#[test]
fn test_init_and_job_list() {
    let db = setup_test_db("cli_init");
    init_db_with_job(&db);

    rjc()
        .args(["--db", &db, "job", "list"])
        .assert()
        .success()
        .stdout(contains("Smith garage"))
        .stdout(contains("40.00"));
}

#[test]
fn test_summary_and_progress() {
    let db = setup_test_db("cli_summary");
    init_db_with_job(&db);
    add_entries(&db);

    rjc()
        .args(["--db", &db, "summary", "1", "--by", "component"])
        .assert()
        .success()
        .stdout(contains("Framing"))
        .stdout(contains("General (clock-in)"))
        .stdout(contains("32.00 h"));

    // 8 clock-in man-hours of a 40 h estimate
    rjc()
        .args(["--db", &db, "progress", "1"])
        .assert()
        .success()
        .stdout(contains("20.0%"))
        .stdout(contains("Labor budget:"));
}

#[test]
fn test_row_insert_after_position() {
    let db = setup_test_db("cli_rows");
    init_db_with_job(&db);

    for desc in ["Lumber", "Paint"] {
        rjc()
            .args([
                "--db", &db, "row", "add", "1", "materials", desc, "--qty", "1", "--unit-cost",
                "10",
            ])
            .assert()
            .success();
    }
    rjc()
        .args([
            "--db", &db, "row", "add", "1", "other", "Permit", "--qty", "1", "--unit-cost", "50",
            "--after", "1",
        ])
        .assert()
        .success();

    let out = rjc()
        .args(["--db", &db, "row", "list", "1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    let lumber = text.find("Lumber").unwrap();
    let permit = text.find("Permit").unwrap();
    let paint = text.find("Paint").unwrap();
    assert!(lumber < permit && permit < paint);
}

#[test]
fn test_row_requires_quantity() {
    let db = setup_test_db("cli_row_missing");
    init_db_with_job(&db);

    rjc()
        .args(["--db", &db, "row", "add", "1", "labor", "Crew", "--unit-cost", "45"])
        .assert()
        .failure()
        .stderr(contains("Missing required field: quantity"));

    rjc()
        .args(["--db", &db, "row", "add", "1", "plumbing", "Pipes", "--qty", "1", "--unit-cost", "5"])
        .assert()
        .failure()
        .stderr(contains("Invalid category"));
}

#[test]
fn test_crew_role_cannot_add_rows() {
    let db = setup_test_db("cli_crew");
    init_db_with_job(&db);

    rjc()
        .args([
            "--db", &db, "--role", "crew", "row", "add", "1", "materials", "Lumber", "--qty", "1",
            "--unit-cost", "10",
        ])
        .assert()
        .failure()
        .stderr(contains("requires the office role"));
}

#[test]
fn test_proposal_with_markup() {
    let db = setup_test_db("cli_proposal");
    init_db_with_job(&db);

    rjc()
        .args([
            "--db", &db, "row", "add", "1", "sub", "Electrician", "--qty", "10", "--unit-cost",
            "60", "--markup", "20",
        ])
        .assert()
        .success();

    rjc()
        .args(["--db", &db, "proposal", "1", "--markup", "15"])
        .assert()
        .success()
        .stdout(contains("828.00"))
        .stdout(contains("57.96"))
        .stdout(contains("885.96"));
}

#[test]
fn test_export_json_and_csv() {
    let db = setup_test_db("cli_export");
    init_db_with_job(&db);
    add_entries(&db);
    rjc()
        .args([
            "--db", &db, "row", "add", "1", "equipment", "Lift", "--qty", "2", "--unit-cost", "100",
        ])
        .assert()
        .success();

    let json_out = temp_out("cli_export", "json");
    rjc()
        .args(["--db", &db, "export", "1", "--format", "json", "--file", &json_out])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(json["job"]["name"], "Smith garage");
    assert_eq!(json["total_man_hours"], 32.0);
    assert!(json["by_component"].is_array());

    let csv_out = temp_out("cli_export", "csv");
    rjc()
        .args(["--db", &db, "export", "1", "--format", "csv", "--file", &csv_out, "--force"])
        .assert()
        .success();
    let csv = fs::read_to_string(&csv_out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("section,label,category,cost,price,tax,total"));
    assert_eq!(lines.next(), Some("row,Lift,equipment,200.0,200.0,14.0,214.0"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db = setup_test_db("cli_export_rel");
    init_db_with_job(&db);

    rjc()
        .args(["--db", &db, "export", "1", "--format", "json", "--file", "report.json"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_log_records_mutations() {
    let db = setup_test_db("cli_log");
    init_db_with_job(&db);
    rjc()
        .args(["--db", &db, "labor", "set", "1", "45"])
        .assert()
        .success();

    rjc()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("job_add"))
        .stdout(contains("labor_rate"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_invalid_timestamp_is_rejected() {
    let db = setup_test_db("cli_bad_ts");
    init_db_with_job(&db);

    rjc()
        .args(["--db", &db, "entry", "add", "1", "--start", "tomorrow", "--hours", "4"])
        .assert()
        .failure()
        .stderr(contains("Invalid timestamp"));
}

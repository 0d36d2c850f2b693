//! CLI - quote file in, JSON envelope out

use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output};

const QUOTE: &str = r#"{
    "quote_id": "Q-CLI-1",
    "items": [
        {
            "id": "li-1",
            "service_name": "Website",
            "unit_price": 100.0,
            "quantity": 1,
            "line_total": 100.0,
            "internal_note": "Friend of the owner"
        },
        {
            "id": "li-2",
            "service_name": "Maintenance",
            "unit_price": 50.0,
            "quantity": 1,
            "line_total": 50.0,
            "is_recurring": true,
            "recurring_interval": "monthly",
            "recurring_count": 3
        }
    ],
    "global_discount_percentage": 10,
    "global_tax_percentage": 22,
    "start_date": "2025-01-15"
}"#;

fn run(contents: &str, args: &[&str]) -> Output {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();

    Command::new(env!("CARGO_BIN_EXE_quote-engine"))
        .arg(file.path())
        .args(args)
        .env("LOG_LEVEL", "error")
        .env("CURRENCY_LOCALE", "it-IT")
        .env("SCHEDULE_STEPPING", "primary")
        .env_remove("LOG_DIR")
        .env_remove("LOG_JSON")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_editor_report() {
    let output = run(QUOTE, &[]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["code"], 0);
    let data = &json["data"];
    assert_eq!(data["quote_id"], "Q-CLI-1");
    assert_eq!(data["totals"]["grand_total"], 109.8);
    assert_eq!(data["totals"]["subtotal_recurring_monthly"], 50.0);
    assert_eq!(data["formatted"]["grand_total"], "109,80 €");
    assert!(data["totals"]["commercial_metrics"].is_object());
    // Initial payment + 3 monthly payments
    assert_eq!(data["schedule"]["events"].as_array().unwrap().len(), 4);
    assert_eq!(data["schedule"]["events"][1]["date"], "2025-02-15");
}

#[test]
fn test_client_view() {
    let output = run(QUOTE, &["--client"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    let data = &json["data"];
    assert_eq!(data["totals"]["grand_total"], 109.8);
    assert!(data["totals"].get("commercial_metrics").is_none());
    assert!(data["items"][0].get("internal_note").is_none());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Friend of the owner"));
}

#[test]
fn test_invalid_input_reports_error_code() {
    let invalid = QUOTE.replace("\"global_tax_percentage\": 22", "\"global_tax_percentage\": 180");
    let output = run(&invalid, &[]);
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["code"], 5002);
    assert_eq!(json["details"]["field"], "global_tax_percentage");
}

#[test]
fn test_malformed_json_fails() {
    let output = run("{ not json", &[]);
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["code"], 6);
    assert!(json["details"]["path"].is_string());
}

#[test]
fn test_unreadable_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_quote-engine"))
        .arg(dir.path().join("missing.json"))
        .env("LOG_LEVEL", "error")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["code"], 9003);
}

#[test]
fn test_missing_file_argument_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_quote-engine"))
        .env("LOG_LEVEL", "error")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage"));
}

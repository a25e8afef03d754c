//! Runs the commands end-to-end against the on-disk fixtures.

use std::path::PathBuf;

use clap::Parser;
use fradrag_cli::{Cli, run};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("fradrag").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_totals_prints_seven_keys() {
    let output = run_args(&["totals", &fixture("questionnaire.json")]).expect("totals should run");

    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value,
        json!({
            "workAndEducationExpenseAmount": 8350.0,
            "healthAndFamilyExpenseAmount": 63400.0,
            "bankAndLoansExpenseAmount": 13750.0,
            "hobbyOddjobsAndExtraIncomesExpenseAmount": 4200.0,
            "housingAndPropertyExpenseAmount": 0.0,
            "giftsOrDonationsExpenseAmount": 3000.0,
            "foreignIncomeExpenseAmount": 3960.0,
        })
    );
}

#[test]
fn test_totals_for_unanswered_questionnaire_is_zero() {
    let output = run_args(&["totals", &fixture("not_answered.json")]).expect("null document is valid");

    let value: Value = serde_json::from_str(&output).unwrap();
    let amounts = value.as_object().unwrap();
    assert_eq!(amounts.len(), 7);
    assert!(amounts.values().all(|amount| amount == &json!(0.0)));
}

#[test]
fn test_totals_out_of_range_sections_still_print() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let output = run_args(&["totals", &fixture("out_of_range.json")]).expect("totals should run");

    let value: Value = serde_json::from_str(&output).unwrap();
    let hobby = value["hobbyOddjobsAndExtraIncomesExpenseAmount"].as_f64().unwrap();
    let housing = value["housingAndPropertyExpenseAmount"].as_f64().unwrap();
    assert!(hobby > 7.9e28, "got {hobby}");
    assert!(housing > 7.9e28, "got {housing}");
}

#[test]
fn test_config_overrides_rates() {
    let output = run_args(&[
        "totals",
        &fixture("questionnaire.json"),
        "--config",
        &fixture("deductions.toml"),
    ])
    .expect("totals should run");

    let value: Value = serde_json::from_str(&output).unwrap();
    // 50,000 interest × 25% + 2,750 BSU
    assert_eq!(value["bankAndLoansExpenseAmount"], json!(15250.0));
    assert_eq!(value["healthAndFamilyExpenseAmount"], json!(63400.0));
}

#[test]
fn test_report_csv_is_in_dashboard_order() {
    let output = run_args(&["report", &fixture("questionnaire.json"), "--format", "csv"])
        .expect("report should run");

    let mut reader = csv::Reader::from_reader(output.as_bytes());
    let titles: Vec<String> = reader
        .records()
        .map(|record| record.unwrap()[0].to_string())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Health and Family",
            "Bank and Loans",
            "Work and Education",
            "Housing and Property",
            "Gifts or Donations",
            "Hobby, Odd jobs, and Extra incomes",
            "Foreign Income",
        ]
    );
}

#[test]
fn test_report_table_rounds_and_totals() {
    let output = run_args(&["report", &fixture("questionnaire.json")]).expect("report should run");

    let last = output.lines().last().unwrap();
    assert!(last.starts_with("Total"));
    // 63,400 + 13,750 + 8,350 + 0 + 3,000 + 4,200 + 3,960
    assert!(last.ends_with("96,660.00"), "got {last:?}");
}

#[test]
fn test_classify_json() {
    let output = run_args(&[
        "classify",
        "--rules",
        &fixture("rules.csv"),
        "--transactions",
        &fixture("transactions.csv"),
        "--format",
        "json",
    ])
    .expect("classify should run");

    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "title": "Office supplies",
                "total_amount": 4749.9,
                "total_original_amount": 4749.9,
                "predefinedCategories": ["clas ohlson", "elkjop"],
            },
            {
                "title": "Travel",
                "total_amount": 39.0,
                "total_original_amount": 39.0,
                "predefinedCategories": ["ruter"],
            },
            {
                "title": "Entertainment",
                "total_amount": 0.0,
                "total_original_amount": 179.0,
                "predefinedCategories": ["netflix"],
            },
        ])
    );
}

#[test]
fn test_missing_questionnaire_reports_path() {
    let error = run_args(&["totals", &fixture("missing.json")]).unwrap_err();

    assert!(format!("{error:#}").contains("missing.json"));
}

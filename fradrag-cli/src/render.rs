//! Writes summaries as a text table, JSON or CSV.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use fradrag_core::calculations::common::round_half_up;
use fradrag_core::{CategorySummary, DeductionTotals};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Which columns a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// Section and deductible amount.
    Personal,
    /// Adds the amount spent and the rule values that matched.
    Business,
}

/// Row shape for CSV output; list cells are joined with `; `.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    category: &'a str,
    total_amount: String,
    total_original_amount: String,
    predefined_categories: String,
}

pub fn write_totals<W: Write>(
    out: &mut W,
    totals: &DeductionTotals,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, totals)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_summaries<W: Write>(
    out: &mut W,
    summaries: &[CategorySummary],
    kind: SummaryKind,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, summaries, kind),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summaries)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(out, summaries),
    }
}

fn write_table<W: Write>(
    out: &mut W,
    summaries: &[CategorySummary],
    kind: SummaryKind,
) -> Result<()> {
    let width = summaries
        .iter()
        .map(|summary| summary.title.chars().count())
        .chain(["Category".len(), "Total".len()])
        .max()
        .unwrap_or_default();

    let mut total = Decimal::ZERO;
    let mut original = Decimal::ZERO;

    match kind {
        SummaryKind::Personal => {
            writeln!(out, "{:<width$}  {:>14}", "Category", "Deductible")?;
            writeln!(out, "{}", "-".repeat(width + 16))?;
            for summary in summaries {
                writeln!(
                    out,
                    "{:<width$}  {:>14}",
                    summary.title,
                    format_amount(summary.total_amount)
                )?;
                total = total.saturating_add(summary.total_amount);
            }
            writeln!(out, "{}", "-".repeat(width + 16))?;
            writeln!(out, "{:<width$}  {:>14}", "Total", format_amount(total))?;
        }
        SummaryKind::Business => {
            writeln!(
                out,
                "{:<width$}  {:>14}  {:>14}  Matched",
                "Category", "Deductible", "Spent"
            )?;
            writeln!(out, "{}", "-".repeat(width + 41))?;
            for summary in summaries {
                writeln!(
                    out,
                    "{:<width$}  {:>14}  {:>14}  {}",
                    summary.title,
                    format_amount(summary.total_amount),
                    format_amount(summary.total_original_amount),
                    summary.predefined_categories.join(", ")
                )?;
                total = total.saturating_add(summary.total_amount);
                original = original.saturating_add(summary.total_original_amount);
            }
            writeln!(out, "{}", "-".repeat(width + 41))?;
            writeln!(
                out,
                "{:<width$}  {:>14}  {:>14}",
                "Total",
                format_amount(total),
                format_amount(original)
            )?;
        }
    }
    Ok(())
}

fn write_csv<W: Write>(
    out: &mut W,
    summaries: &[CategorySummary],
) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for summary in summaries {
        writer.serialize(CsvRow {
            category: &summary.title,
            total_amount: format!("{:.2}", round_half_up(summary.total_amount)),
            total_original_amount: format!("{:.2}", round_half_up(summary.total_original_amount)),
            predefined_categories: summary.predefined_categories.join("; "),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Two decimals, rounded half-up, with `,` between thousands.
pub fn format_amount(value: Decimal) -> String {
    let fixed = format!("{:.2}", round_half_up(value));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{fraction}")
}

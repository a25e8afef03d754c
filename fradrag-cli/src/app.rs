//! Command-line definition and command dispatch.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fradrag_core::{
    CategorySummary, DeductionConfig, QuestionnaireItem, RuleMatcher, SavingExpenseCalculator,
    business_expense_summary, summarize_personal_deductions,
};
use fradrag_data::{QuestionnaireLoader, RuleLoader, TransactionLoader};
use tracing::{debug, info, warn};

use crate::config::load_config;
use crate::render::{OutputFormat, SummaryKind, write_summaries, write_totals};

// --- CLI definition ---

/// Tax deduction calculator for questionnaire answers and bank
/// transactions.
#[derive(Debug, Parser)]
#[command(name = "fradrag", version)]
pub struct Cli {
    /// TOML file overriding the built-in rates and caps.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter: a level ("warn", "debug") or an EnvFilter directive.
    /// Defaults to RUST_LOG, then "info".
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the seven section totals as JSON.
    Totals {
        /// Questionnaire file (`.csv`, otherwise JSON).
        file: PathBuf,
    },

    /// Print the personal-deduction summary in dashboard order.
    Report {
        /// Questionnaire file (`.csv`, otherwise JSON).
        file: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Classify bank transactions with rules and print expenses by category.
    Classify {
        /// Rules CSV: value,category,deduction_status,transaction_type.
        #[arg(long)]
        rules: PathBuf,

        /// Transactions CSV: description,amount,transaction_type.
        #[arg(long)]
        transactions: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

// --- Dispatch ---

/// Runs `cli.command`, writing its output to `out`.
pub fn run<W: Write>(
    cli: &Cli,
    out: &mut W,
) -> Result<()> {
    match &cli.command {
        Command::Totals { file } => {
            let config = load_config(cli.config.as_deref())?;
            let questionnaires = load_questionnaire(file)?;
            let totals = SavingExpenseCalculator::new(&config).calculate(questionnaires.as_deref());
            match totals.total() {
                Some(total) => info!(total = %total, "calculated deduction totals"),
                None => warn!("deduction totals are too large to add up"),
            }
            write_totals(out, &totals)
        }
        Command::Report { file, format } => {
            let config = load_config(cli.config.as_deref())?;
            let summaries = report(&config, file)?;
            write_summaries(out, &summaries, SummaryKind::Personal, *format)
        }
        Command::Classify {
            rules,
            transactions,
            format,
        } => {
            let rules = RuleLoader::load_from_file(rules)
                .with_context(|| format!("cannot load rules from '{}'", rules.display()))?;
            let transactions = TransactionLoader::load_from_file(transactions).with_context(|| {
                format!("cannot load transactions from '{}'", transactions.display())
            })?;

            let matcher = RuleMatcher::new(rules);
            debug!(rules = matcher.len(), transactions = transactions.len(), "classifying");
            let classified = matcher.classify(transactions);
            let unmatched = classified.iter().filter(|c| c.rule.is_none()).count();
            info!(
                classified = classified.len() - unmatched,
                unmatched, "classified transactions"
            );

            let summaries = business_expense_summary(&classified);
            write_summaries(out, &summaries, SummaryKind::Business, *format)
        }
    }
}

fn report(
    config: &DeductionConfig,
    file: &Path,
) -> Result<Vec<CategorySummary>> {
    let questionnaires = load_questionnaire(file)?;
    let totals = SavingExpenseCalculator::new(config).calculate(questionnaires.as_deref());
    Ok(summarize_personal_deductions(&totals))
}

fn load_questionnaire(file: &Path) -> Result<Option<Vec<QuestionnaireItem>>> {
    QuestionnaireLoader::load_from_file(file)
        .with_context(|| format!("cannot load questionnaire from '{}'", file.display()))
}

//! Simulate command implementation
//!
//! Evaluates the scenario sweep, writes the table and charts, and lists the
//! saved files.

use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;
use pricer_trs::{
    ScenarioEvaluator, ScenarioParameters, ScenarioRecord, ScenarioSet, ScenarioSummary,
};
use serde::Serialize;
use service_report::table::{table_to_string, TableRow, TABLE_HEADER};
use service_report::{write_all, OutputPaths};
use tracing::info;

use crate::config::SimConfig;
use crate::{CliError, Result};

/// Console echo of the results, printed before the saved file list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    /// Only list the saved files
    #[default]
    None,
    /// Box-drawn table followed by the run summary
    Table,
    /// Parameters, records and summary as pretty JSON
    Json,
    /// The CSV table exactly as written to disk
    Csv,
}

/// Run options that do not affect the artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Evaluate the grid on the Rayon pool
    pub parallel: bool,
    /// Console echo
    pub print: PrintFormat,
}

/// Run the simulate command, writing console output to `out`.
///
/// Returns the written artifact paths.
pub fn run<W: Write>(config: &SimConfig, options: RunOptions, out: &mut W) -> Result<Vec<PathBuf>> {
    let root = &config.output.dir;
    if root.exists() && !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Output directory {} is not a directory",
            root.display()
        )));
    }

    info!("Running TRS scenario sweep...");
    let evaluator = ScenarioEvaluator::new(config.parameters)?;
    let set = if options.parallel {
        evaluator.evaluate_parallel()
    } else {
        evaluator.evaluate()
    };

    let summary = set.summary();
    info!(
        scenarios = summary.scenario_count,
        financing_fee = summary.financing_fee,
        leverage = summary.leverage,
        breakeven_move = summary.breakeven_move,
        parallel = options.parallel,
        "Scenarios evaluated"
    );

    match options.print {
        PrintFormat::None => {}
        PrintFormat::Table => print_table(&set, &summary, out)?,
        PrintFormat::Json => print_json(&set, &summary, out)?,
        PrintFormat::Csv => out.write_all(table_to_string(&set)?.as_bytes())?,
    }

    let written = write_all(&set, &OutputPaths::under(root))?;

    writeln!(out, "Saved:")?;
    for path in &written {
        writeln!(out, "  - {}", path.display())?;
    }

    info!("Simulation complete");
    Ok(written)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    parameters: &'a ScenarioParameters,
    records: &'a [ScenarioRecord],
    summary: &'a ScenarioSummary,
}

fn print_json<W: Write>(set: &ScenarioSet, summary: &ScenarioSummary, out: &mut W) -> Result<()> {
    let report = JsonReport {
        parameters: set.parameters(),
        records: set.records(),
        summary,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn print_table<W: Write>(set: &ScenarioSet, summary: &ScenarioSummary, out: &mut W) -> Result<()> {
    let rows: Vec<[String; 6]> = set
        .iter()
        .map(|r| TableRow::from_record(r).fields())
        .collect();

    let mut widths = TABLE_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, field) in widths.iter_mut().zip(row) {
            *width = (*width).max(field.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    let header: Vec<String> = TABLE_HEADER
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!(" {:<w$} ", h, w = *w))
        .collect();
    writeln!(out, "│{}│", header.join("│"))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    if rows.is_empty() {
        let inner = widths.iter().map(|w| w + 3).sum::<usize>() - 1;
        writeln!(out, "│{:<inner$}│", " (no scenarios)", inner = inner)?;
    }
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(f, w)| format!(" {:>w$} ", f, w = *w))
            .collect();
        writeln!(out, "│{}│", cells.join("│"))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;

    let range = |lo: Option<f64>, hi: Option<f64>, scale: f64, suffix: &str| match (lo, hi) {
        (Some(lo), Some(hi)) => format!("{:.2}{suffix} .. {:.2}{suffix}", lo * scale, hi * scale),
        _ => "n/a".to_string(),
    };

    writeln!(out)?;
    writeln!(out, "Scenarios:        {}", summary.scenario_count)?;
    writeln!(out, "Financing fee:    {:.2}", summary.financing_fee)?;
    writeln!(out, "Leverage:         {:.2}x", summary.leverage)?;
    writeln!(out, "Break-even move:  {:.2}%", summary.breakeven_move * 100.0)?;
    writeln!(
        out,
        "Net PnL range:    {}",
        range(summary.worst_net_pnl, summary.best_net_pnl, 1.0, "")
    )?;
    writeln!(
        out,
        "Return range:     {}",
        range(
            summary.worst_return_on_collateral,
            summary.best_return_on_collateral,
            100.0,
            "%"
        )
    )?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_trs::TrsError;

    fn config_in(dir: &std::path::Path) -> SimConfig {
        let mut config = SimConfig::default();
        config.output.dir = dir.to_path_buf();
        config
    }

    fn run_to_string(config: &SimConfig, options: RunOptions) -> (Result<Vec<PathBuf>>, String) {
        let mut out = Vec::new();
        let result = run(config, options, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_lists_saved_files() {
        let dir = tempfile::tempdir().unwrap();
        let (result, output) = run_to_string(&config_in(dir.path()), RunOptions::default());

        let written = result.unwrap();
        assert_eq!(written.len(), 3);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Saved:");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("trs_results.csv"));
        assert!(lines[2].ends_with("trs_pnl.png"));
        assert!(lines[3].ends_with("trs_return_on_collateral.png"));
        for path in &written {
            assert!(path.is_file());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let seq_dir = tempfile::tempdir().unwrap();
        let par_dir = tempfile::tempdir().unwrap();

        let seq = run_to_string(&config_in(seq_dir.path()), RunOptions::default()).0.unwrap();
        let par = run_to_string(
            &config_in(par_dir.path()),
            RunOptions {
                parallel: true,
                ..RunOptions::default()
            },
        )
        .0
        .unwrap();

        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
        }
    }

    #[test]
    fn test_print_table() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            print: PrintFormat::Table,
            ..RunOptions::default()
        };
        let (result, output) = run_to_string(&config_in(dir.path()), options);
        result.unwrap();

        assert!(output.starts_with("┌"));
        assert!(output.contains("│ Market Move (%) │"));
        assert!(output.contains("-250000.0"));
        assert!(output.contains("Leverage:         5.00x"));
        assert!(output.contains("Break-even move:  5.00%"));
        assert!(output.contains("Return range:     -125.00% .. 75.00%"));
        assert!(output.contains("Saved:"));
    }

    #[test]
    fn test_print_table_empty_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.parameters.move_step = -0.05;
        let options = RunOptions {
            print: PrintFormat::Table,
            ..RunOptions::default()
        };
        let (result, output) = run_to_string(&config, options);
        result.unwrap();

        assert!(output.contains("(no scenarios)"));
        assert!(output.contains("Net PnL range:    n/a"));
    }

    #[test]
    fn test_print_json() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            print: PrintFormat::Json,
            ..RunOptions::default()
        };
        let (result, output) = run_to_string(&config_in(dir.path()), options);
        result.unwrap();

        let json_end = output.find("Saved:").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output[..json_end]).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 9);
        assert_eq!(value["parameters"]["collateral"], 200_000.0);
        assert_eq!(value["summary"]["scenario_count"], 9);
        assert_eq!(value["records"][0]["trs_net_pnl"], -250_000.0);
    }

    #[test]
    fn test_print_csv_matches_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            print: PrintFormat::Csv,
            ..RunOptions::default()
        };
        let (result, output) = run_to_string(&config_in(dir.path()), options);
        let written = result.unwrap();

        let on_disk = std::fs::read_to_string(&written[0]).unwrap();
        assert!(output.starts_with(&on_disk));
    }

    #[test]
    fn test_invalid_collateral() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.parameters.collateral = 0.0;

        let (result, output) = run_to_string(&config, RunOptions::default());
        assert!(matches!(
            result,
            Err(CliError::Pricing(TrsError::InvalidCollateral(_)))
        ));
        assert!(output.is_empty());
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn test_output_dir_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, "x").unwrap();

        let (result, _) = run_to_string(&config_in(&file), RunOptions::default());
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}

use anyhow::Context;
use ibei_core::RawValue;
use ibei_core::config::ScenarioReport;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use super::CliError;

pub(super) const LOG_ENV_VAR: &str = "IBEI_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OutputFormat {
    Human,
    Json,
}

/// Logs go to stderr so JSON on stdout stays machine readable.
pub(super) fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Command-line values are parsed like JSON strings, so `300K` and `1.1 eV`
/// both work.
pub(super) fn raw_value(text: &str) -> RawValue {
    RawValue::Text(text.to_string())
}

pub(super) fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).context("failed to serialize command output")?;
    println!("{rendered}");
    Ok(())
}

pub(super) fn write_json_report<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create report directory '{}'", parent.display()))?;
    }
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    fs::write(path, rendered)
        .with_context(|| format!("failed to write report '{}'", path.display()))?;
    Ok(())
}

pub(super) fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    format!("{value:.9e}")
}

pub(super) fn render_rows(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn render_scenario_summary(report: &ScenarioReport) -> String {
    let mut lines = Vec::new();
    for integral in &report.integrals {
        lines.push(format!(
            "integral {}: order={} upper={} lower={} full={} [{}]",
            integral.id,
            integral.order,
            format_value(integral.upper),
            format_value(integral.lower),
            format_value(integral.full),
            integral.unit
        ));
    }
    for cell in &report.cells {
        lines.push(format!(
            "cell {} ({}): power={} W m^-2 efficiency={:.6}",
            cell.id,
            cell.model,
            format_value(cell.power_density),
            cell.efficiency
        ));
    }
    for check in report.checks().filter(|check| !check.comparison.passes) {
        lines.push(format!(
            "FAIL {} {}: expected={} actual={} rel_diff={}",
            check.id,
            check.quantity,
            format_value(check.expected),
            format_value(check.actual),
            format_value(check.comparison.rel_diff)
        ));
    }

    let total = report.checks().count();
    let failed = report.failed_checks();
    lines.push(format!(
        "{}: {} of {} checks passed",
        if report.passed { "PASSED" } else { "FAILED" },
        total - failed,
        total
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{format_value, render_rows};

    #[test]
    fn values_render_in_scientific_notation() {
        assert_eq!(format_value(1.25e7), "1.250000000e7");
        assert_eq!(format_value(f64::INFINITY), "inf");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn rows_are_left_aligned() {
        let rendered = render_rows(&[("a", "1".to_string()), ("long", "2".to_string())]);
        assert_eq!(rendered, "a     1\nlong  2");
    }
}

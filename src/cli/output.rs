//! Report rendering for the command-line interface

use std::io::Write;

use butterfly_apsp::RunReport;

/// How the final report is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Write `report` to `out` in the requested format
pub fn write_report(report: &RunReport, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", report.render())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

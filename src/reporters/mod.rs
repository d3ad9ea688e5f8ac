pub mod csv;
pub mod json;
pub mod tabular;

use std::io::Write;
use crate::error::FameResult;
use crate::types::{AuthorStats, OutputFormat};

pub const HEADER: [&str; 4] = ["Name", "Lines", "Commits", "Files"];

/// Writes the ranked rows in the selected format.
pub fn render<W: Write>(format: OutputFormat, rows: &[AuthorStats], out: &mut W) -> FameResult<()> {
    match format {
        OutputFormat::Tabular   => tabular::report_tabular(rows, out),
        OutputFormat::Csv       => csv::report_csv(rows, out),
        OutputFormat::Json      => json::report_json(rows, out),
        OutputFormat::JsonLines => json::report_json_lines(rows, out),
    }
}

fn cells(row: &AuthorStats) -> [String; 4] {
    [
        row.name.clone(),
        row.lines.to_string(),
        row.commits.to_string(),
        row.files.to_string(),
    ]
}

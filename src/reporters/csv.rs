use std::io::Write;
use crate::error::FameResult;
use crate::types::AuthorStats;
use super::{cells, HEADER};

/// Header plus one comma-separated record per row, quoted per RFC 4180.
pub fn report_csv<W: Write>(rows: &[AuthorStats], out: &mut W) -> FameResult<()> {
    write_record(out, &HEADER)?;
    for row in rows {
        write_record(out, &cells(row))?;
    }
    Ok(())
}

fn write_record<W: Write, S: AsRef<str>>(out: &mut W, fields: &[S]) -> FameResult<()> {
    let line: Vec<String> = fields.iter().map(|f| quote(f.as_ref())).collect();
    writeln!(out, "{}", line.join(","))?;
    Ok(())
}

fn quote(field: &str) -> String {
    let needs_quotes = field.starts_with(char::is_whitespace)
        || field.contains([',', '"', '\r', '\n']);
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

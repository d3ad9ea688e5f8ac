use std::io::Write;
use crate::error::FameResult;
use crate::types::AuthorStats;

/// One JSON array holding every row in ranked order.
pub fn report_json<W: Write>(rows: &[AuthorStats], out: &mut W) -> FameResult<()> {
    serde_json::to_writer(&mut *out, rows)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// One JSON object per line.
pub fn report_json_lines<W: Write>(rows: &[AuthorStats], out: &mut W) -> FameResult<()> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

use comfy_table::{presets::NOTHING, Table};
use std::io::Write;
use crate::error::FameResult;
use crate::types::AuthorStats;
use super::{cells, HEADER};

/// Whitespace-aligned columns: each column is as wide as its widest cell
/// plus one space. No borders, no trailing whitespace.
pub fn report_tabular<W: Write>(rows: &[AuthorStats], out: &mut W) -> FameResult<()> {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(HEADER.to_vec());
    for row in rows {
        table.add_row(cells(row).to_vec());
    }
    for column in table.column_iter_mut() {
        column.set_padding((0, 1));
    }

    for line in table.to_string().lines() {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rows: &[AuthorStats]) -> String {
        let mut buf = Vec::new();
        report_tabular(rows, &mut buf).expect("render");
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_then_ranked_rows() {
        let rows = vec![
            AuthorStats { name: "Alice Liddell".into(), lines: 1204, commits: 31, files: 12 },
            AuthorStats { name: "Bob".into(),           lines: 7,    commits: 2,  files: 1 },
        ];
        let text = render(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split_whitespace().collect::<Vec<_>>(), vec!["Name", "Lines", "Commits", "Files"]);
        assert!(lines[1].starts_with("Alice Liddell"));
        assert!(lines[2].starts_with("Bob"));
        assert!(lines[2].ends_with('1'));
    }

    #[test]
    fn test_columns_are_aligned() {
        let rows = vec![
            AuthorStats { name: "Alice Liddell".into(), lines: 1204, commits: 31, files: 12 },
            AuthorStats { name: "Bob".into(),           lines: 7,    commits: 2,  files: 1 },
        ];
        let text = render(&rows);
        let lines: Vec<&str> = text.lines().collect();
        let col = lines[0].find("Lines").expect("Lines header");
        assert_eq!(lines[1].find("1204"), Some(col));
        assert_eq!(&lines[2][col..col + 1], "7");
        let col = lines[0].find("Commits").expect("Commits header");
        assert_eq!(lines[1].find("31"), Some(col));
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let rows = vec![AuthorStats { name: "Bob".into(), lines: 7, commits: 2, files: 1 }];
        assert!(render(&rows).lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn test_empty_result_still_prints_header() {
        let text = render(&[]);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Name"));
    }
}

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use crate::error::{FameError, FameResult};
use crate::types::{AttributionEvent, IdentityRole, TrackedFile};
use super::{history, run_git, split_keyword};

/// Attributes every line of `file` at `revision`.
///
/// Falls back to the file's last history entry when blame has nothing to say
/// (zero-byte files), so that the file still counts towards its author.
pub fn attribute_file(
    repo: &Path,
    revision: &str,
    file: &TrackedFile,
    role: IdentityRole,
) -> FameResult<Vec<AttributionEvent>> {
    let args = [
        OsStr::new("blame"),
        OsStr::new("--porcelain"),
        OsStr::new(revision),
        OsStr::new("--"),
        file.path.as_os_str(),
    ];
    let report = run_git(repo, &args)?;

    if report.is_empty() {
        tracing::debug!(file = file.name.as_str(), "empty blame report, resolving from history");
        return Ok(history::resolve_empty_file(repo, revision, file, role).into_iter().collect());
    }

    let events = parse_blame(&report, &file.name, role)?;
    tracing::debug!(file = file.name.as_str(), hunks = events.len(), "blamed");
    Ok(events)
}

// ─── Porcelain parser ─────────────────────────────────────────────────────────

struct Header<'a> {
    commit: &'a str,
    count:  Option<usize>,
}

struct Hunk<'a> {
    commit:     &'a str,
    line_count: usize,
    remaining:  usize,
}

/// Parses `git blame --porcelain` output into one event per hunk.
///
/// The contributor of a hunk is looked up when the hunk completes, from the
/// identities recorded so far for its commit; porcelain only prints a
/// commit's metadata the first time the commit appears.
pub fn parse_blame(report: &str, file: &str, role: IdentityRole) -> FameResult<Vec<AttributionEvent>> {
    let malformed = |line: usize, reason: String| FameError::Parse {
        file: file.to_string(),
        line,
        reason,
    };

    let mut events: Vec<AttributionEvent> = Vec::new();
    // commit → contributor, commit → last group size
    let mut identities:  HashMap<&str, &str>  = HashMap::new();
    let mut group_sizes: HashMap<&str, usize> = HashMap::new();
    let mut current: Option<Hunk> = None;
    let mut line_no = 0;

    for line in report.lines() {
        line_no += 1;

        let Some(mut hunk) = current.take() else {
            let header = parse_header(line).map_err(|reason| malformed(line_no, reason))?;
            let line_count = match header.count {
                Some(count) => {
                    group_sizes.insert(header.commit, count);
                    count
                }
                None => *group_sizes.get(header.commit).ok_or_else(|| {
                    malformed(line_no, format!("no line count recorded for commit {}", header.commit))
                })?,
            };
            current = Some(Hunk { commit: header.commit, line_count, remaining: line_count });
            continue;
        };

        if line.starts_with('\t') {
            hunk.remaining -= 1;
            if hunk.remaining == 0 {
                let author = identities.get(hunk.commit).copied().unwrap_or_default();
                events.push(AttributionEvent {
                    author:     author.to_string(),
                    commit:     hunk.commit.to_string(),
                    file:       file.to_string(),
                    line_count: hunk.line_count,
                });
                continue;
            }
        } else if line.is_empty() {
            return Err(malformed(line_no, "blank line inside a hunk".to_string()));
        } else {
            // Metadata for this commit, or the short header porcelain repeats
            // before each further line of the group. Only the selected role matters.
            let (keyword, value) = split_keyword(line);
            if keyword == role.keyword() {
                identities.insert(hunk.commit, value);
            }
        }

        current = Some(hunk);
    }

    if let Some(hunk) = current {
        return Err(malformed(
            line_no,
            format!("report ended with {} line(s) of commit {} still expected", hunk.remaining, hunk.commit),
        ));
    }

    Ok(events)
}

/// `<commit> <orig-line> <final-line> [<count>]`
fn parse_header(line: &str) -> Result<Header<'_>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(format!("expected a hunk header with 3 or 4 fields, found {}: {line:?}", fields.len()));
    }

    for field in &fields[1..3] {
        if field.parse::<usize>().is_err() {
            return Err(format!("line number {field:?} is not a number in header {line:?}"));
        }
    }

    let count = match fields.get(3) {
        None => None,
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) | Err(_) => return Err(format!("invalid line count {raw:?} in header {line:?}")),
            Ok(n) => Some(n),
        },
    };

    Ok(Header { commit: fields[0], count })
}

use std::ffi::OsStr;
use std::path::Path;
use crate::types::{AttributionEvent, IdentityRole, TrackedFile};
use super::{run_git, split_keyword};

// Same keywords as blame porcelain, and the mailmap-aware name placeholders,
// so both paths yield the same token for one contributor.
const LAST_COMMIT_FORMAT: &str = "--format=commit %H%nauthor %aN%ncommitter %cN";

/// Credits an empty file to whoever last touched it, as a single zero-line
/// event. A file without reachable history contributes nothing.
pub fn resolve_empty_file(
    repo: &Path,
    revision: &str,
    file: &TrackedFile,
    role: IdentityRole,
) -> Option<AttributionEvent> {
    let args = [
        OsStr::new("log"),
        OsStr::new("-1"),
        OsStr::new(LAST_COMMIT_FORMAT),
        OsStr::new(revision),
        OsStr::new("--"),
        file.path.as_os_str(),
    ];
    let output = match run_git(repo, &args) {
        Ok(out) => out,
        Err(e) => {
            tracing::debug!(file = file.name.as_str(), error = %e, "history lookup failed, skipping empty file");
            return None;
        }
    };

    let event = parse_last_commit(&output, &file.name, role);
    if event.is_none() {
        tracing::debug!(file = file.name.as_str(), "no history entry for empty file");
    }
    event
}

/// Reads the first `commit` line and the first line of the selected role.
pub fn parse_last_commit(output: &str, file: &str, role: IdentityRole) -> Option<AttributionEvent> {
    let mut commit:   Option<&str> = None;
    let mut identity: Option<&str> = None;

    for line in output.lines() {
        let (keyword, value) = split_keyword(line);
        if keyword == "commit" && commit.is_none() {
            commit = Some(value);
        } else if keyword == role.keyword() && identity.is_none() {
            identity = Some(value);
        }
    }

    let commit = commit.filter(|c| !c.is_empty())?;
    Some(AttributionEvent {
        author:     identity?.to_string(),
        commit:     commit.to_string(),
        file:       file.to_string(),
        line_count: 0,
    })
}

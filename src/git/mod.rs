pub mod blame;
pub mod history;
pub mod ls_tree;

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;
use crate::error::{FameError, FameResult};

/// Runs `git <args>` inside `cwd` and returns its raw stdout.
/// A spawn failure or a non-zero exit becomes [`FameError::Git`].
pub fn run_git_bytes<S: AsRef<OsStr>>(cwd: &Path, args: &[S]) -> FameResult<Vec<u8>> {
    let command = format!(
        "git {}",
        args.iter().map(|a| a.as_ref().to_string_lossy()).collect::<Vec<_>>().join(" ")
    );

    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| FameError::Git { command: command.clone(), stderr: format!("failed to run git: {e}") })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(FameError::Git { command, stderr });
    }

    Ok(output.stdout)
}

/// Like [`run_git_bytes`], decoding stdout as text.
pub fn run_git<S: AsRef<OsStr>>(cwd: &Path, args: &[S]) -> FameResult<String> {
    let stdout = run_git_bytes(cwd, args)?;
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

/// Splits a metadata line into its keyword and the rest of the line after the
/// first whitespace run: `"author Jane Doe"` → `("author", "Jane Doe")`.
pub(crate) fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim_start()),
        None                  => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keyword_keeps_full_remainder() {
        assert_eq!(split_keyword("author Jane Doe <jane@x.com>"), ("author", "Jane Doe <jane@x.com>"));
    }

    #[test]
    fn test_split_keyword_collapses_leading_whitespace_run() {
        assert_eq!(split_keyword("committer \t  Bob"), ("committer", "Bob"));
    }

    #[test]
    fn test_split_keyword_without_value() {
        assert_eq!(split_keyword("boundary"), ("boundary", ""));
    }

    #[test]
    fn test_run_git_reports_failure_with_command() {
        let tmp = std::env::temp_dir();
        match run_git(&tmp, &["definitely-not-a-git-subcommand"]) {
            Err(FameError::Git { command, .. }) => {
                assert!(command.contains("definitely-not-a-git-subcommand"), "command should be named: {command}");
            }
            other => panic!("expected a git error, got {other:?}"),
        }
    }
}

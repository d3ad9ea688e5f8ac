use std::path::Path;
use crate::error::{FameError, FameResult};
use crate::types::TrackedFile;
use super::run_git_bytes;

/// Lists every tracked blob at `revision`, as repository-relative paths.
pub fn list_files(repo: &Path, revision: &str) -> FameResult<Vec<TrackedFile>> {
    let output = run_git_bytes(repo, &["ls-tree", "-r", "-z", revision])?;
    parse_ls_tree(&output)
}

/// Parses NUL-separated `<mode> <type> <object>\t<path>` entries.
/// Submodules (`commit` entries) have no lines of their own and are skipped.
/// Path bytes are kept as git reported them, whatever their encoding.
pub fn parse_ls_tree(output: &[u8]) -> FameResult<Vec<TrackedFile>> {
    let mut files = Vec::new();

    for entry in output.split(|&b| b == 0).filter(|e| !e.is_empty()) {
        let malformed = || FameError::Git {
            command: "git ls-tree".to_string(),
            stderr:  format!("malformed entry: {:?}", String::from_utf8_lossy(entry)),
        };

        let tab = entry.iter().position(|&b| b == b'\t').ok_or_else(malformed)?;
        let (meta, path) = (&entry[..tab], &entry[tab + 1..]);
        let meta = std::str::from_utf8(meta).map_err(|_| malformed())?;
        let fields: Vec<&str> = meta.split_whitespace().collect();
        if fields.len() != 3 || path.is_empty() {
            return Err(malformed());
        }
        if fields[1] == "blob" {
            files.push(TrackedFile::from_bytes(path));
        }
    }

    Ok(files)
}

use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

// ─── Attribution ──────────────────────────────────────────────────────────────

/// A file listed by `git ls-tree`.
///
/// `path` holds the exact bytes git reported and is what gets passed back to
/// git; `name` is its printable form, used for filtering and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    pub path: OsString,
    pub name: String,
}

impl TrackedFile {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let name = String::from_utf8_lossy(bytes).into_owned();
        #[cfg(unix)]
        let path = {
            use std::os::unix::ffi::OsStringExt;
            OsString::from_vec(bytes.to_vec())
        };
        #[cfg(not(unix))]
        let path = OsString::from(name.clone());
        TrackedFile { path, name }
    }
}

impl AsRef<str> for TrackedFile {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// One contiguous block of lines (or a synthetic empty-file marker) credited
/// to a single contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionEvent {
    pub author:     String,
    pub commit:     String,
    pub file:       String,
    pub line_count: usize,
}

/// Which side of a commit's metadata names the contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityRole {
    #[default]
    Author,
    Committer,
}

impl IdentityRole {
    pub fn from_use_committer(use_committer: bool) -> Self {
        if use_committer { IdentityRole::Committer } else { IdentityRole::Author }
    }

    /// The porcelain metadata keyword carrying this role's name.
    pub fn keyword(self) -> &'static str {
        match self {
            IdentityRole::Author    => "author",
            IdentityRole::Committer => "committer",
        }
    }
}

// ─── Aggregation ──────────────────────────────────────────────────────────────

/// Per-contributor running totals. Commits and files are sets so that
/// replayed events never inflate the distinct counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorRecord {
    pub lines:   usize,
    pub commits: BTreeSet<String>,
    pub files:   BTreeSet<String>,
}

impl AuthorRecord {
    pub fn commit_count(&self) -> usize { self.commits.len() }
    pub fn file_count(&self) -> usize { self.files.len() }
}

/// A ranked output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorStats {
    pub name:    String,
    pub lines:   usize,
    pub commits: usize,
    pub files:   usize,
}

impl AuthorStats {
    pub fn from_record(name: &str, record: &AuthorRecord) -> Self {
        AuthorStats {
            name:    name.to_string(),
            lines:   record.lines,
            commits: record.commit_count(),
            files:   record.file_count(),
        }
    }

    pub fn key(&self, key: SortKey) -> usize {
        match key {
            SortKey::Lines   => self.lines,
            SortKey::Commits => self.commits,
            SortKey::Files   => self.files,
        }
    }
}

// ─── Options ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Lines,
    Commits,
    Files,
}

impl SortKey {
    /// Fixed tie-break precedence used after the primary key.
    pub const PRECEDENCE: [SortKey; 3] = [SortKey::Lines, SortKey::Commits, SortKey::Files];
    pub const NAMES: &'static str = "\"lines\", \"commits\", \"files\"";
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Lines   => write!(f, "lines"),
            SortKey::Commits => write!(f, "commits"),
            SortKey::Files   => write!(f, "files"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines"   => Ok(SortKey::Lines),
            "commits" => Ok(SortKey::Commits),
            "files"   => Ok(SortKey::Files),
            other     => Err(format!(
                "Invalid 'order_by' value: \"{other}\". Expected one of: {}",
                SortKey::NAMES
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Tabular,
    Csv,
    Json,
    JsonLines,
}

impl OutputFormat {
    pub const NAMES: &'static str = "\"tabular\", \"csv\", \"json\", \"json-lines\"";
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Tabular   => write!(f, "tabular"),
            OutputFormat::Csv       => write!(f, "csv"),
            OutputFormat::Json      => write!(f, "json"),
            OutputFormat::JsonLines => write!(f, "json-lines"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabular"    => Ok(OutputFormat::Tabular),
            "csv"        => Ok(OutputFormat::Csv),
            "json"       => Ok(OutputFormat::Json),
            "json-lines" => Ok(OutputFormat::JsonLines),
            other        => Err(format!(
                "Invalid 'format' value: \"{other}\". Expected one of: {}",
                OutputFormat::NAMES
            )),
        }
    }
}

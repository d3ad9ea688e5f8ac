use std::collections::HashMap;
use crate::types::{AttributionEvent, AuthorRecord};

/// Folds attribution events into one [`AuthorRecord`] per contributor.
///
/// Lines are summed per event. Commits and files are kept as sets, so a
/// replayed event inflates `lines` but never the distinct counters.
#[derive(Debug, Default)]
pub struct Aggregator {
    authors: HashMap<String, AuthorRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &AttributionEvent) {
        let record = self.authors.entry(event.author.clone()).or_default();
        record.lines += event.line_count;
        record.commits.insert(event.commit.clone());
        record.files.insert(event.file.clone());
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a AttributionEvent>) {
        for event in events {
            self.record(event);
        }
    }

    /// Absorbs a partial aggregate built from a disjoint set of hunks.
    /// Sets are unioned rather than their sizes summed, so an author seen by
    /// both sides in the same commit or file is still counted once.
    pub fn merge(&mut self, other: Aggregator) {
        for (author, theirs) in other.authors {
            let ours = self.authors.entry(author).or_default();
            ours.lines += theirs.lines;
            ours.commits.extend(theirs.commits);
            ours.files.extend(theirs.files);
        }
    }

    /// Final per-author records. The empty identity marks hunks whose commit
    /// never named a contributor and is dropped here.
    pub fn finish(mut self) -> HashMap<String, AuthorRecord> {
        self.authors.remove("");
        self.authors
    }
}

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use crate::error::{FameError, FameResult};

/// Which tracked files take part in attribution.
#[derive(Debug, Default)]
pub struct FileFilter {
    restrict_to: Option<GlobSet>,
    exclude:     Option<GlobSet>,
    extensions:  Option<Vec<String>>,
}

impl FileFilter {
    /// Compiles the selection flags. Empty lists mean "not given".
    /// Languages widen the extension list; unknown names are warned about and,
    /// when nothing at all resolves, leave files unrestricted by suffix.
    pub fn new(
        extensions:  &[String],
        languages:   &[String],
        exclude:     &[String],
        restrict_to: &[String],
    ) -> FameResult<Self> {
        let mut suffixes: Vec<String> = extensions.to_vec();
        for language in languages {
            match crate::languages::extensions_for(language) {
                Some(exts) => suffixes.extend(exts.iter().cloned()),
                None => tracing::warn!(language = language.as_str(), "unknown language, ignoring"),
            }
        }

        Ok(FileFilter {
            restrict_to: build_globset(restrict_to)?,
            exclude:     build_globset(exclude)?,
            extensions:  (!suffixes.is_empty()).then_some(suffixes),
        })
    }

    pub fn matches(&self, file: &str) -> bool {
        if let Some(set) = &self.restrict_to {
            if !set.is_match(file) { return false; }
        }
        if let Some(set) = &self.exclude {
            if set.is_match(file) { return false; }
        }
        if let Some(exts) = &self.extensions {
            if !exts.iter().any(|ext| file.ends_with(ext.as_str())) { return false; }
        }
        true
    }
}

/// `*` and `?` stop at `/`, like shell path matching.
fn build_globset(patterns: &[String]) -> FameResult<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| FameError::Config(format!("invalid glob \"{pattern}\": {e}")))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|e| FameError::Config(format!("invalid glob set: {e}")))?;
    Ok(Some(set))
}

/// Keeps the files accepted by `filter`, preserving their order.
pub fn filter_files<F: AsRef<str> + Clone>(files: &[F], filter: &FileFilter) -> Vec<F> {
    files.iter().filter(|f| filter.matches(f.as_ref())).cloned().collect()
}

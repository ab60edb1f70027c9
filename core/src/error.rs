use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the catalog and building the index. All of them are
/// fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog has no columns")]
    NoColumns,
    #[error("empty vocabulary: no catalog row contains indexable text")]
    EmptyVocabulary,
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

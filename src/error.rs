use std::io;

use thiserror::Error;

use crate::coercion::ColumnKind;

/// Failure to produce a usable expense table from the source file.
///
/// All variants are fatal. No partial table is ever exposed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("required column '{column}' is missing from the header")]
    MissingColumn { column: &'static str },

    #[error("failed to read expense records: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Coercion(#[from] TypeCoercionError),
}

/// A cell whose text could not be converted to its column's declared type.
/// `row` is the 1-based data row, counted from the first row after the header.
#[derive(Debug, Error)]
#[error("row {row}, column '{column}': cannot coerce \"{cell}\" to {kind}")]
pub struct TypeCoercionError {
    pub row: usize,
    pub column: &'static str,
    pub kind: ColumnKind,
    pub cell: String,
}

use std::fs::File;

use log::debug;
use serde::Deserialize;

use crate::coercion;
use crate::error::LoadError;

/// Field delimiter of the expense file.
const DELIMITER: u8 = b';';

/// One row of the expense file as it appears on disk, before coercion.
/// Serde maps fields by header name, so column order in the file is free.
#[derive(Debug, Deserialize)]
pub struct ExpenseRecordRaw {
    pub date: String,
    pub product: String,
    pub value: String,
    pub category: String,
    pub payment_method: String,
    pub priority: String,
    pub my_expense: String,
    pub fixed_expense: String,
    pub details: String,
}

/// Reads every row of a `;`-delimited expense file into raw string records.
///
/// Fails if any of the nine schema columns is missing from the header or a
/// row is malformed. Cells are not trimmed; the source system keeps
/// surrounding whitespace and so do we. The file handle is owned by the
/// reader and released when this function returns, on success or failure.
pub fn read_raw_records(file: File) -> Result<Vec<ExpenseRecordRaw>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    for (column, _) in coercion::schema() {
        if !headers.iter().any(|name| name == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }

    let mut records = Vec::new();
    for result in reader.into_deserialize() {
        records.push(result?);
    }
    debug!("read {} raw expense records", records.len());
    Ok(records)
}

use std::fmt;

use chrono::NaiveDate;

/// Date format used when converting date cells.
pub const DATE_STR_FMT: &str = "%m/%d/%Y";

/// The closed set of column types a cell can be coerced to.
///
/// Every column of the source file maps to exactly one of these kinds (see
/// [`schema`]), so there is no "unknown format" case to handle at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Numeric,
    Bool,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Date => "date",
            ColumnKind::Numeric => "numeric",
            ColumnKind::Bool => "boolean",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// The nine required columns of the expense file and the coercion each gets.
/// Column order in the file is irrelevant; all nine names must be present.
pub fn schema() -> [(&'static str, ColumnKind); 9] {
    [
        ("date", ColumnKind::Date),
        ("product", ColumnKind::Text),
        ("value", ColumnKind::Numeric),
        ("category", ColumnKind::Text),
        ("payment_method", ColumnKind::Text),
        ("priority", ColumnKind::Bool),
        ("my_expense", ColumnKind::Bool),
        ("fixed_expense", ColumnKind::Bool),
        ("details", ColumnKind::Text),
    ]
}

/// Parses a date cell in `MM/DD/YYYY` form.
pub fn date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell, DATE_STR_FMT).ok()
}

/// Parses a numeric cell. The source file may use a comma as the decimal
/// separator, so every comma is replaced with a period before parsing.
pub fn numeric(cell: &str) -> Option<f64> {
    cell.replace(',', ".").parse().ok()
}

/// Coerces a boolean cell: strip the substring "no" wherever it occurs, then
/// a non-empty remainder means true.
///
/// The strip applies to any occurrence of "no", not just the whole word, so
/// text that merely contains it ("nobody" -> "bdy") still coerces to true.
/// The source system behaves this way and the rule is reproduced as-is.
pub fn boolean(cell: &str) -> bool {
    !cell.replace("no", "").is_empty()
}

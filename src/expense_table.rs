use std::cmp::Ordering;
use std::fs::File;

use chrono::NaiveDate;
use log::debug;

use crate::coercion::{self, ColumnKind};
use crate::csv_handler::{self, ExpenseRecordRaw};
use crate::error::{LoadError, TypeCoercionError};

/// How many items and categories the summary lists per section.
const TOP_N: usize = 3;

/// Banner width used to separate summary sections.
const BANNER_WIDTH: usize = 50;

/// Credit expenses before this date are excluded from the credit summary.
/// The debit summary has no such bound; the asymmetry is deliberate.
fn credit_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 1).expect("valid cutoff date")
}

/// One fully coerced row of the expense file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub product: String,
    pub value: f64,
    pub category: String,
    pub payment_method: String,
    pub priority: bool,
    pub my_expense: bool,
    pub fixed_expense: bool,
    pub details: String,
}

impl ExpenseRecord {
    /// Coerces a raw row into its typed form. `row` is the 1-based data row,
    /// used only for error reporting.
    fn from_raw(raw: ExpenseRecordRaw, row: usize) -> Result<Self, TypeCoercionError> {
        let date = coercion::date(&raw.date).ok_or_else(|| TypeCoercionError {
            row,
            column: "date",
            kind: ColumnKind::Date,
            cell: raw.date.clone(),
        })?;
        let value = coercion::numeric(&raw.value).ok_or_else(|| TypeCoercionError {
            row,
            column: "value",
            kind: ColumnKind::Numeric,
            cell: raw.value.clone(),
        })?;
        Ok(ExpenseRecord {
            date,
            product: raw.product,
            value,
            category: raw.category,
            payment_method: raw.payment_method,
            priority: coercion::boolean(&raw.priority),
            my_expense: coercion::boolean(&raw.my_expense),
            fixed_expense: coercion::boolean(&raw.fixed_expense),
            details: raw.details,
        })
    }
}

/// Free-text columns a filter can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    Product,
    Category,
    PaymentMethod,
    Details,
}

impl TextColumn {
    fn get(self, record: &ExpenseRecord) -> &str {
        match self {
            TextColumn::Product => &record.product,
            TextColumn::Category => &record.category,
            TextColumn::PaymentMethod => &record.payment_method,
            TextColumn::Details => &record.details,
        }
    }
}

/// The loaded expense table. Built once from the source file, immutable
/// afterwards; every query hands out a fresh sequence of borrowed records.
#[derive(Debug)]
pub struct ExpenseTable {
    records: Vec<ExpenseRecord>,
}

impl ExpenseTable {
    /// Loads and coerces the expense file at `path`.
    ///
    /// Any open or read failure, missing column, malformed row, or cell that
    /// cannot be coerced aborts the load.
    pub fn load(path: &str) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_string(),
            source,
        })?;
        let raw = csv_handler::read_raw_records(file)?;
        let mut records = Vec::with_capacity(raw.len());
        for (idx, raw_record) in raw.into_iter().enumerate() {
            records.push(ExpenseRecord::from_raw(raw_record, idx + 1)?);
        }
        debug!("loaded {} expense records from {}", records.len(), path);
        Ok(ExpenseTable { records })
    }

    /// Records with `my_expense == own_expense` whose `column` equals `value`
    /// exactly (case-sensitive). File order is preserved.
    pub fn filtered(&self, own_expense: bool, column: TextColumn, value: &str) -> Vec<&ExpenseRecord> {
        self.records
            .iter()
            .filter(|r| r.my_expense == own_expense && column.get(r) == value)
            .collect()
    }

    /// Sums the value field, rounded to 2 decimal places. `f64::round` rounds
    /// half away from zero. An empty sequence sums to 0.00.
    pub fn sum_value(records: &[&ExpenseRecord]) -> f64 {
        let total: f64 = records.iter().map(|r| r.value).sum();
        (total * 100.0).round() / 100.0
    }

    /// Sums the value field over records dated on or after `threshold`.
    pub fn sum_value_since(records: &[&ExpenseRecord], threshold: NaiveDate) -> f64 {
        let since: Vec<&ExpenseRecord> = records
            .iter()
            .copied()
            .filter(|r| r.date >= threshold)
            .collect();
        Self::sum_value(&since)
    }

    /// The `n` most expensive records, descending by value. The sort is
    /// stable, so records with equal values keep their file order.
    pub fn top_by_value<'a>(records: &[&'a ExpenseRecord], n: usize) -> Vec<&'a ExpenseRecord> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        sorted.truncate(n);
        sorted
    }

    /// The `n` categories with the largest summed value. Groups are keyed by
    /// exact category text; ties keep the order of first appearance.
    pub fn top_categories<'a>(records: &[&'a ExpenseRecord], n: usize) -> Vec<(&'a str, f64)> {
        let mut totals: Vec<(&str, f64)> = Vec::new();
        for record in records {
            match totals.iter_mut().find(|(category, _)| *category == record.category) {
                Some((_, total)) => *total += record.value,
                None => totals.push((record.category.as_str(), record.value)),
            }
        }
        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        totals.truncate(n);
        totals
    }

    /// Renders the full debit/credit summary as printable text.
    ///
    /// The debit section covers all own debit expenses. The credit section is
    /// restricted to the cutoff window: its total, items, and categories all
    /// come from the date-bounded subset.
    pub fn summary(&self) -> String {
        let banner = "=".repeat(BANNER_WIDTH);
        let cutoff = credit_cutoff();

        let debit = self.filtered(true, TextColumn::PaymentMethod, "debit");
        let credit = self.filtered(true, TextColumn::PaymentMethod, "credit");
        let credit_recent: Vec<&ExpenseRecord> = credit
            .iter()
            .copied()
            .filter(|r| r.date >= cutoff)
            .collect();
        debug!(
            "summary over {} debit and {} credit records ({} credit on/after {})",
            debit.len(),
            credit.len(),
            credit_recent.len(),
            cutoff
        );

        let mut out = String::new();
        out.push_str(&banner);
        out.push('\n');
        out.push_str(&format!(
            "Sum of all debit expenses:  ${:.2}\n",
            Self::sum_value(&debit)
        ));
        out.push_str("\nMost expensive items paid in debit: \n");
        push_items(&mut out, &Self::top_by_value(&debit, TOP_N));
        out.push_str("\nMost expensive categories paid in debit: \n");
        push_categories(&mut out, &Self::top_categories(&debit, TOP_N));
        out.push_str(&banner);
        out.push('\n');

        out.push_str(&banner);
        out.push('\n');
        out.push_str(&format!(
            "Sum of all credit expenses: ${:.2}\n",
            Self::sum_value_since(&credit, cutoff)
        ));
        out.push_str("\nMost expensive items paid in credit: \n");
        push_items(&mut out, &Self::top_by_value(&credit_recent, TOP_N));
        out.push_str("\nMost expensive categories paid in credit: \n");
        push_categories(&mut out, &Self::top_categories(&credit_recent, TOP_N));
        out.push_str(&banner);
        out.push('\n');
        out
    }
}

fn push_items(out: &mut String, records: &[&ExpenseRecord]) {
    for record in records {
        out.push_str(&format!(
            "  {}  {:<16} {:>10.2}  {}\n",
            record.date.format(coercion::DATE_STR_FMT),
            record.product,
            record.value,
            record.category
        ));
    }
}

fn push_categories(out: &mut String, categories: &[(&str, f64)]) {
    for (category, total) in categories {
        out.push_str(&format!("  {:<16} {:>10.2}\n", category, total));
    }
}

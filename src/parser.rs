use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::error::{ConvertError, Result};
use crate::models::{Transaction, TransactionKind};

/// Non-data banner rows at the top of the export, before the header row
const BANNER_ROWS: usize = 2;

const COL_CATEGORY: &str = "Category";
const COL_DATE: &str = "Date";
const COL_DESCRIPTION: &str = "Description";
const COL_AMOUNT: &str = "Amount";
const COL_FUND: &str = "Fund";
const COL_SHARES: &str = "Shares";

/// Column indices resolved from the header row by name
struct Columns {
    category: usize,
    date: usize,
    description: usize,
    amount: usize,
    fund: usize,
    shares: usize,
}

impl Columns {
    fn from_header(record: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            record
                .iter()
                .position(|field| field.trim() == name)
                .ok_or(ConvertError::MissingColumn(name))
        };
        Ok(Self {
            category: find(COL_CATEGORY)?,
            date: find(COL_DATE)?,
            description: find(COL_DESCRIPTION)?,
            amount: find(COL_AMOUNT)?,
            fund: find(COL_FUND)?,
            shares: find(COL_SHARES)?,
        })
    }
}

/// Parse a statement export into transactions, preserving input order.
///
/// The first two rows are discarded, the third names the columns, and
/// every later row is matched positionally against those names. Blank
/// rows are skipped. An export too short to contain a header yields an
/// empty sequence; any malformed data row aborts the whole parse.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut columns: Option<Columns> = None;
    let mut transactions = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        if index < BANNER_ROWS {
            continue;
        }
        let columns = match columns {
            Some(ref columns) => columns,
            None => {
                columns = Some(Columns::from_header(&record)?);
                continue;
            }
        };
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(index + 1, |p| p.line() as usize);
        transactions.push(parse_row(columns, &record, line)?);
    }

    Ok(transactions)
}

fn parse_row(columns: &Columns, record: &StringRecord, line: usize) -> Result<Transaction> {
    let field = |index: usize, column: &'static str| {
        record
            .get(index)
            .ok_or(ConvertError::MissingField { line, column })
    };

    let category = field(columns.category, COL_CATEGORY)?;
    let kind = TransactionKind::from_category(category).ok_or_else(|| {
        ConvertError::UnknownCategory {
            line,
            category: category.trim().to_string(),
        }
    })?;

    let raw_date = field(columns.date, COL_DATE)?;
    let date = parse_date(raw_date).ok_or_else(|| ConvertError::MalformedDate {
        line,
        value: raw_date.trim().to_string(),
    })?;

    let raw_amount = field(columns.amount, COL_AMOUNT)?;
    let amount = parse_amount(raw_amount).ok_or_else(|| ConvertError::MalformedAmount {
        line,
        value: raw_amount.trim().to_string(),
    })?;

    let description = field(columns.description, COL_DESCRIPTION)?.trim().to_string();
    let security = field(columns.fund, COL_FUND)?.trim().to_string();
    let quantity = field(columns.shares, COL_SHARES)?.trim().to_string();

    Ok(Transaction::new(
        kind,
        date,
        description,
        amount,
        security,
        quantity,
    ))
}

/// Parse an `MM/DD/YYYY` date field.
/// The year must be written out in full; chrono alone would read
/// `1/2/23` as year 23 and misdate the transaction by two millennia.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let (_, year) = raw.rsplit_once('/')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

/// Parse an amount field, stripping at most one leading currency symbol
/// and all thousands separators; sign and decimal point are preserved
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let s = s.strip_prefix('$').unwrap_or(s);
    let value: Decimal = s.replace(',', "").parse().ok()?;
    Some(if negative { -value } else { value })
}

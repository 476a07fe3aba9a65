//! The cleaned-ledger CSV: written by `extract`, read back by `report`.
//!
//! Column contract: `S.No,Date,Transaction Id,Remarks,Balance,Debit,Credit`.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{PassbookError, Result};
use crate::fmt::plain;
use crate::models::{LedgerRow, TransactionRecord};

pub const HEADER: [&str; 7] = [
    "S.No",
    "Date",
    "Transaction Id",
    "Remarks",
    "Balance",
    "Debit",
    "Credit",
];

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

pub fn coerce_amount(raw: &str) -> Option<Decimal> {
    let s = raw.trim().replace(',', "");
    if s.is_empty() {
        return None;
    }
    s.parse::<Decimal>().ok()
}

pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

pub fn coerce_seq(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

pub fn write_ledger_to<W: Write>(writer: W, records: &[TransactionRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for r in records {
        wtr.write_record([
            r.seq.to_string(),
            r.date.format("%Y-%m-%d").to_string(),
            r.txn_id.clone(),
            r.remarks.clone(),
            plain(r.balance),
            plain(r.debit),
            plain(r.credit),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create `path` (and its parent directory) for writing.
pub fn create_output(path: &Path) -> Result<File> {
    let wrap = |source| PassbookError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    File::create(path).map_err(wrap)
}

pub fn write_ledger(path: &Path, records: &[TransactionRecord]) -> Result<()> {
    let file = create_output(path)?;
    write_ledger_to(file, records).map_err(|e| match e {
        PassbookError::Io(source) => PassbookError::OutputWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

struct Columns {
    seq: usize,
    date: usize,
    txn_id: usize,
    remarks: usize,
    balance: usize,
    debit: usize,
    credit: usize,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| PassbookError::Other(format!("Ledger is missing column '{name}'")))
        };
        Ok(Self {
            seq: find("S.No")?,
            date: find("Date")?,
            txn_id: find("Transaction Id")?,
            remarks: find("Remarks")?,
            balance: find("Balance")?,
            debit: find("Debit")?,
            credit: find("Credit")?,
        })
    }
}

/// Read ledger rows, coercing each field on its own. A field that does not
/// parse becomes `None`; the row is kept.
pub fn read_ledger_from<R: Read>(reader: R) -> Result<Vec<LedgerRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let cols = Columns::from_header(rdr.headers()?)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let get = |i: usize| record.get(i).unwrap_or("");
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(LedgerRow {
            seq: coerce_seq(get(cols.seq)),
            date: coerce_date(get(cols.date)),
            txn_id: get(cols.txn_id).trim().to_string(),
            remarks: get(cols.remarks).trim().to_string(),
            balance: coerce_amount(get(cols.balance)),
            debit: coerce_amount(get(cols.debit)),
            credit: coerce_amount(get(cols.credit)),
        });
    }
    Ok(rows)
}

pub fn load_ledger(path: &Path) -> Result<Vec<LedgerRow>> {
    let file = File::open(path).map_err(|_| PassbookError::InputNotFound(path.to_path_buf()))?;
    let rows = read_ledger_from(BufReader::new(file))?;
    if rows.is_empty() {
        return Err(PassbookError::NoTransactions(path.to_path_buf()));
    }
    Ok(rows)
}

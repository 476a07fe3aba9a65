//! Statement text grammar.
//!
//! A transaction line reads, token by token:
//!
//! ```text
//! <seq> <dd/mm/yyyy> <txn id> <remarks...> <amount> (Dr|Cr) <balance> (Cr)
//! ```
//!
//! Each element has its own extractor so a layout change shows up as a
//! rejection naming the element that stopped matching, instead of the line
//! quietly disappearing.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::{Direction, StatementEntry, TransactionRecord};

fn seq_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap())
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d,]+\.\d{2}$").unwrap())
}

// ---------------------------------------------------------------------------
// Token extractors
// ---------------------------------------------------------------------------

pub fn seq(token: &str) -> Option<u32> {
    if !seq_re().is_match(token) {
        return None;
    }
    token.parse().ok().filter(|n| *n > 0)
}

/// True when the token has the `dd/mm/yyyy` shape, whether or not it is a real date.
pub fn looks_like_date(token: &str) -> bool {
    date_re().is_match(token)
}

pub fn date(token: &str) -> Option<NaiveDate> {
    if !looks_like_date(token) {
        return None;
    }
    NaiveDate::parse_from_str(token, "%d/%m/%Y").ok()
}

/// Statement amount: thousands separators allowed, exactly two fraction digits.
pub fn amount(token: &str) -> Option<Decimal> {
    if !amount_re().is_match(token) {
        return None;
    }
    let digits = token.replace(',', "");
    // "," alone or ",.50" passes the shape check but has no integer part
    if digits.starts_with('.') {
        return None;
    }
    digits.parse().ok()
}

pub fn marker(token: &str) -> Option<Direction> {
    Direction::from_marker(token)
}

// ---------------------------------------------------------------------------
// Line grammar
// ---------------------------------------------------------------------------

/// Grammar element that failed on a candidate transaction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    TxnId,
    Remarks,
    AmountTail,
    BalanceMarker,
    ZeroAmount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Date => "date is not a calendar date",
            Self::TxnId => "missing transaction id",
            Self::Remarks => "missing remarks",
            Self::AmountTail => "no <amount> (Dr|Cr) <balance> (Cr) tail",
            Self::BalanceMarker => "balance is not marked (Cr)",
            Self::ZeroAmount => "amount is zero",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub line_no: usize,
    pub field: Field,
    pub line: String,
}

#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub entries: Vec<StatementEntry>,
    pub rejections: Vec<Rejection>,
}

enum LineMatch {
    NotCandidate,
    Entry(StatementEntry),
    Rejected(Field),
}

struct Tail {
    amount: Decimal,
    direction: Direction,
    balance: Decimal,
}

/// Match `<amount> (Dr|Cr) <balance> <marker>` starting at `tokens[0]`.
/// `Err(BalanceMarker)` when everything but the final `(Cr)` lines up.
fn tail(tokens: &[&str]) -> Option<Result<Tail, Field>> {
    if tokens.len() < 4 {
        return None;
    }
    let value = amount(tokens[0])?;
    let direction = marker(tokens[1])?;
    let balance = amount(tokens[2])?;
    match marker(tokens[3])? {
        Direction::Credit => Some(Ok(Tail {
            amount: value,
            direction,
            balance,
        })),
        Direction::Debit => Some(Err(Field::BalanceMarker)),
    }
}

fn match_line(line: &str) -> LineMatch {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return LineMatch::NotCandidate;
    }
    let Some(seq) = seq(tokens[0]) else {
        return LineMatch::NotCandidate;
    };
    if !looks_like_date(tokens[1]) {
        return LineMatch::NotCandidate;
    }
    let Some(date) = date(tokens[1]) else {
        return LineMatch::Rejected(Field::Date);
    };
    let Some(txn_id) = tokens.get(2) else {
        return LineMatch::Rejected(Field::TxnId);
    };
    if tokens.len() < 4 {
        return LineMatch::Rejected(Field::Remarks);
    }

    // Shortest remarks run that leaves a valid tail behind it.
    let mut first_failure = None;
    for end in 4..tokens.len() {
        match tail(&tokens[end..]) {
            // A zero amount would be neither a debit nor a credit.
            Some(Ok(t)) if t.amount.is_zero() => {
                return LineMatch::Rejected(Field::ZeroAmount);
            }
            Some(Ok(t)) => {
                return LineMatch::Entry(StatementEntry {
                    seq,
                    date,
                    txn_id: txn_id.to_string(),
                    remarks: tokens[3..end].join(" "),
                    amount: t.amount,
                    direction: t.direction,
                    balance: t.balance,
                });
            }
            Some(Err(field)) => {
                first_failure.get_or_insert(field);
            }
            None => {}
        }
    }
    LineMatch::Rejected(first_failure.unwrap_or(Field::AmountTail))
}

/// Parse the concatenated page text of a statement.
///
/// Entries come back in text order. Lines that do not start with a sequence
/// number and a date are ignored; lines that do but fail later in the grammar
/// are reported in `rejections`.
pub fn parse_statement(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    for (idx, line) in text.lines().enumerate() {
        match match_line(line) {
            LineMatch::NotCandidate => {}
            LineMatch::Entry(entry) => outcome.entries.push(entry),
            LineMatch::Rejected(field) => outcome.rejections.push(Rejection {
                line_no: idx + 1,
                field,
                line: line.trim().to_string(),
            }),
        }
    }
    outcome
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Split each entry's amount into debit/credit and order by date.
///
/// The sort is stable: same-day entries keep their statement order.
pub fn build_ledger(entries: Vec<StatementEntry>) -> Vec<TransactionRecord> {
    let mut records: Vec<TransactionRecord> =
        entries.into_iter().map(TransactionRecord::from_entry).collect();
    records.sort_by_key(|r| r.date);
    records
}

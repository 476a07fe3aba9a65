use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Dr/Cr marker printed next to a statement amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "(Dr)" => Some(Self::Debit),
            "(Cr)" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// One transaction line as read off the statement, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementEntry {
    pub seq: u32,
    pub date: NaiveDate,
    pub txn_id: String,
    pub remarks: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub balance: Decimal,
}

/// A normalized transaction. Exactly one of `debit`/`credit` is non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub seq: u32,
    pub date: NaiveDate,
    pub txn_id: String,
    pub remarks: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance: Decimal,
}

impl TransactionRecord {
    pub fn from_entry(entry: StatementEntry) -> Self {
        let (debit, credit) = match entry.direction {
            Direction::Debit => (entry.amount, Decimal::ZERO),
            Direction::Credit => (Decimal::ZERO, entry.amount),
        };
        Self {
            seq: entry.seq,
            date: entry.date,
            txn_id: entry.txn_id,
            remarks: entry.remarks,
            debit,
            credit,
            balance: entry.balance,
        }
    }
}

/// A ledger row loaded back from CSV. `None` marks a field that failed to coerce.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerRow {
    pub seq: Option<u32>,
    pub date: Option<NaiveDate>,
    pub txn_id: String,
    pub remarks: String,
    pub balance: Option<Decimal>,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

impl LedgerRow {
    /// Credit amount if this row is a credit (present and positive).
    pub fn credit_amount(&self) -> Option<Decimal> {
        self.credit.filter(|c| *c > Decimal::ZERO)
    }

    /// Debit amount if this row is a debit (present and positive).
    pub fn debit_amount(&self) -> Option<Decimal> {
        self.debit.filter(|d| *d > Decimal::ZERO)
    }
}

impl From<&TransactionRecord> for LedgerRow {
    fn from(r: &TransactionRecord) -> Self {
        Self {
            seq: Some(r.seq),
            date: Some(r.date),
            txn_id: r.txn_id.clone(),
            remarks: r.remarks.clone(),
            balance: Some(r.balance),
            debit: Some(r.debit),
            credit: Some(r.credit),
        }
    }
}

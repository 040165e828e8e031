use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account numbers stay plain strings: the file format trusts whatever is
/// already on disk, and only *newly created* accounts go through the
/// 4-character check in `validate`.
pub(crate) type AccountNumber = String;

/// The two kinds of transaction the ledger knows about. The wire encoding is
/// a single character, `D` or `W`; anything else fails to deserialize rather
/// than being coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum TxKind {
    #[serde(rename = "D")]
    Deposit,
    #[serde(rename = "W")]
    Withdrawal,
}

impl TxKind {
    pub fn label(self) -> &'static str {
        match self {
            TxKind::Deposit => "Deposit",
            TxKind::Withdrawal => "Withdrawal",
        }
    }
}

/// One transaction as the ledger holds it in memory. The holder name is
/// duplicated on every transaction of an account instead of living in a
/// separate account header - that's the shape of the on-disk format, and the
/// first transaction's name is authoritative for display. `date` is a
/// `YY-MM-DD` string and is never parsed into a calendar type; ordering is
/// plain lexicographic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub name: String,
    pub date: String,
    pub kind: TxKind,
    pub amount: Decimal,
}

/// One line of the persisted file: `account:name:date:kind:amount`. Field
/// order here is the wire order, since the file has no header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Record {
    pub account: AccountNumber,
    pub name: String,
    pub date: String,
    pub kind: TxKind,
    pub amount: Decimal,
}

impl Record {
    pub fn new(account: &str, tx: &Transaction) -> Self {
        Self {
            account: account.to_string(),
            name: tx.name.clone(),
            date: tx.date.clone(),
            kind: tx.kind,
            amount: tx.amount,
        }
    }

    pub fn into_parts(self) -> (AccountNumber, Transaction) {
        (
            self.account,
            Transaction {
                name: self.name,
                date: self.date,
                kind: self.kind,
                amount: self.amount,
            },
        )
    }
}

/// Fatal errors from loading or flushing the ledger file. A malformed line
/// aborts the whole load - persisting a partially loaded table on quit would
/// silently drop the rows that failed to parse.
#[derive(Error, Debug)]
pub(crate) enum StoreError {
    #[error("malformed record at line {line}: expected account:name:date:type:amount")]
    MalformedRecord { line: u64 },
    #[error("ledger file error: {0}")]
    Persistence(#[from] std::io::Error),
}

impl StoreError {
    /// Collapse a `csv` error into ours, keeping the offending line number
    /// when the reader knows it.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(e) => StoreError::Persistence(e),
            _ => StoreError::MalformedRecord { line },
        }
    }
}

/// Errors a user can recover from at the prompt. These never cross the
/// interactive loop; the menu re-prompts until the input validates or the
/// user quits.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("account numbers must be exactly 4 characters")]
    BadAccountNumber,
    #[error("account {0} already exists")]
    DuplicateAccount(AccountNumber),
    #[error("no account numbered {0}")]
    UnknownAccount(AccountNumber),
    #[error("transaction type must be W or D")]
    BadTransactionType,
    #[error("amount must be a non-negative decimal number")]
    BadAmount,
    #[error("holder name must be non-empty and may not contain ':'")]
    BadHolderName,
    #[error("choice does not exist")]
    BadMenuChoice,
}

use crate::data::{AccountNumber, Record, Transaction, TxKind, ValidationError};
use crate::validate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The in-memory account table. Rebuilt from the flat file on every run,
/// mutated only here, and flushed back in full on quit. The exercise is
/// single-threaded so there are no protections for MT.
///
/// `order` tracks the order account numbers were first seen while loading;
/// the map alone would give us nondeterministic iteration and the flushed
/// file would shuffle between runs for records sharing a date.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    accounts: HashMap<AccountNumber, Vec<Transaction>>,
    order: Vec<AccountNumber>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains_key(number)
    }

    /// Load-path insertion: file data is trusted as-is, so no format checks.
    /// First-seen numbers establish the table order.
    pub fn insert_record(&mut self, record: Record) {
        let (number, tx) = record.into_parts();
        match self.accounts.get_mut(&number) {
            Some(txs) => txs.push(tx),
            None => {
                self.accounts.insert(number.clone(), vec![tx]);
                self.order.push(number);
            }
        }
    }

    /// Create a fresh account with its first transaction attached. An account
    /// never exists without at least one transaction; the holder name lives
    /// on the transactions themselves.
    pub fn create_account(
        &mut self,
        number: &str,
        first: Transaction,
    ) -> Result<(), ValidationError> {
        if !validate::account_number_ok(number) {
            return Err(ValidationError::BadAccountNumber);
        }
        if self.contains(number) {
            return Err(ValidationError::DuplicateAccount(number.to_string()));
        }
        self.accounts.insert(number.to_string(), vec![first]);
        self.order.push(number.to_string());
        Ok(())
    }

    pub fn append(&mut self, number: &str, tx: Transaction) -> Result<(), ValidationError> {
        match self.accounts.get_mut(number) {
            Some(txs) => {
                txs.push(tx);
                Ok(())
            }
            None => Err(ValidationError::UnknownAccount(number.to_string())),
        }
    }

    /// Deposits summed, withdrawals subtracted, in stored order. Unknown
    /// accounts read as zero.
    pub fn balance(&self, number: &str) -> Decimal {
        let mut balance = Decimal::ZERO;
        for tx in self.accounts.get(number).into_iter().flatten() {
            match tx.kind {
                TxKind::Deposit => balance += tx.amount,
                TxKind::Withdrawal => balance -= tx.amount,
            }
        }
        balance
    }

    /// Balance as currency text, always two decimal places.
    pub fn balance_display(&self, number: &str) -> String {
        let mut balance = self.balance(number);
        balance.rescale(2);
        balance.to_string()
    }

    /// The name on the account's first transaction.
    pub fn holder_name(&self, number: &str) -> Option<&str> {
        self.accounts
            .get(number)
            .and_then(|txs| txs.first())
            .map(|tx| tx.name.as_str())
    }

    /// Account numbers in menu order: by holder name, number as tie-break.
    pub fn sorted_for_display(&self) -> Vec<AccountNumber> {
        let mut numbers = self.order.clone();
        numbers.sort_by(|a, b| {
            let name_a = self.holder_name(a).unwrap_or_default();
            let name_b = self.holder_name(b).unwrap_or_default();
            name_a.cmp(name_b).then_with(|| a.cmp(b))
        });
        numbers
    }

    /// An account's transactions in ascending date order. The sort is on the
    /// raw `YY-MM-DD` text and stable, so equal dates keep insertion order.
    pub fn history(&self, number: &str) -> Vec<Transaction> {
        let mut txs = self
            .accounts
            .get(number)
            .map(|txs| txs.to_vec())
            .unwrap_or_default();
        txs.sort_by(|a, b| a.date.cmp(&b.date));
        txs
    }

    /// Flatten back to wire records, accounts in first-seen order. The date
    /// sort for the file happens at write time, not here.
    pub fn records(&self) -> Vec<Record> {
        let mut records = Vec::new();
        for number in &self.order {
            for tx in &self.accounts[number] {
                records.push(Record::new(number, tx));
            }
        }
        records
    }
}

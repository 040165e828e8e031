use crate::data::{TxKind, ValidationError};
use crate::ledger::Ledger;
use rust_decimal::Decimal;

/// New account numbers must be exactly 4 characters. That is the whole rule:
/// the source data never carried a digits-only constraint, so neither do we.
pub(crate) fn account_number_ok(number: &str) -> bool {
    number.chars().count() == 4
}

pub(crate) fn account_is_new(number: &str, ledger: &Ledger) -> bool {
    !ledger.contains(number)
}

/// Case-insensitive `D`/`W` parse. Unknown letters are rejected here instead
/// of being coerced to a deposit somewhere down the line.
pub(crate) fn parse_kind(input: &str) -> Result<TxKind, ValidationError> {
    match input.trim().to_ascii_uppercase().as_str() {
        "D" => Ok(TxKind::Deposit),
        "W" => Ok(TxKind::Withdrawal),
        _ => Err(ValidationError::BadTransactionType),
    }
}

/// Amounts entered at the prompt must parse as a decimal and be
/// non-negative; the sign of a transaction comes from its kind, never from
/// the amount.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let amount: Decimal = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::BadAmount)?;
    if amount.is_sign_negative() {
        return Err(ValidationError::BadAmount);
    }
    Ok(amount)
}

/// The flat format has no escaping, so a holder name containing the field
/// delimiter could never round-trip. Existing file content is trusted as-is;
/// this only guards names typed at the prompt.
pub(crate) fn check_holder_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || name.contains(':') {
        return Err(ValidationError::BadHolderName);
    }
    Ok(())
}

/// Menu entries are numbered from 1; returns the zero-based index.
pub(crate) fn menu_choice(input: &str, count: usize) -> Result<usize, ValidationError> {
    let n: usize = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::BadMenuChoice)?;
    if n == 0 || n > count {
        return Err(ValidationError::BadMenuChoice);
    }
    Ok(n - 1)
}

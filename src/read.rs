use crate::data::{Record, StoreError};
use crate::ledger::Ledger;
use std::io::ErrorKind;
use std::path::Path;

/// Trait for doing something with a `Record` pulled out of the flat file.
/// The ledger is the real consumer; tests use a plain vector sink to check
/// the reader independently of the table.
pub(crate) trait RecordSink {
    fn take(&mut self, record: Record);
}

impl RecordSink for Ledger {
    fn take(&mut self, record: Record) {
        self.insert_record(record);
    }
}

/// Streams `account:name:date:type:amount` lines into a sink. The format is
/// colon-delimited with no header and no escaping, so quoting is switched
/// off; blank lines are skipped by the reader. Any line that does not
/// deserialize into the five expected fields aborts the load - no partial
/// ledger ever reaches the caller.
pub(crate) fn read_records<R: std::io::Read, S: RecordSink>(
    reader: R,
    sink: &mut S,
) -> Result<(), StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b':')
        .has_headers(false)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut count = 0usize;
    for result in rdr.deserialize() {
        let record: Record = result.map_err(StoreError::from_csv)?;
        sink.take(record);
        count += 1;
    }
    log::debug!("loaded {count} records");
    Ok(())
}

/// Builds the ledger from the persisted file. A missing file is an empty
/// ledger, so a first run can seed the database through the add-transaction
/// flow.
pub(crate) fn load(path: &Path) -> Result<Ledger, StoreError> {
    let mut ledger = Ledger::new();
    match std::fs::File::open(path) {
        Ok(file) => read_records(file, &mut ledger)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("no ledger file at {}, starting empty", path.display());
        }
        Err(e) => return Err(StoreError::Persistence(e)),
    }
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Transaction, TxKind};
    use rust_decimal_macros::dec;

    #[derive(Default)]
    struct RecordStorage {
        records: Vec<Record>,
    }

    impl RecordSink for RecordStorage {
        fn take(&mut self, record: Record) {
            self.records.push(record);
        }
    }

    fn record(account: &str, name: &str, date: &str, kind: TxKind, amount: &str) -> Record {
        Record::new(
            account,
            &Transaction {
                name: name.to_string(),
                date: date.to_string(),
                kind,
                amount: amount.parse().unwrap(),
            },
        )
    }

    #[test]
    fn read_records_from_flat_file() {
        let mut storage = RecordStorage::default();
        let input = b"\
1234:Zoe Hart:19-01-01:D:100.00
1234:Zoe Hart:19-01-02:W:30.00
0042:Abe Ford:18-12-25:D:5.50
";
        read_records(&input[..], &mut storage).unwrap();
        assert_eq!(
            storage.records,
            [
                record("1234", "Zoe Hart", "19-01-01", TxKind::Deposit, "100.00"),
                record("1234", "Zoe Hart", "19-01-02", TxKind::Withdrawal, "30.00"),
                record("0042", "Abe Ford", "18-12-25", TxKind::Deposit, "5.50"),
            ]
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut storage = RecordStorage::default();
        let input = b"\
1234:Zoe Hart:19-01-01:D:100.00

0042:Abe Ford:18-12-25:D:5.50
";
        read_records(&input[..], &mut storage).unwrap();
        assert_eq!(storage.records.len(), 2);
    }

    #[test]
    fn short_line_aborts_the_load() {
        let mut storage = RecordStorage::default();
        let input = b"\
1234:Zoe Hart:19-01-01:D:100.00
0042:Abe Ford:18-12-25:D
";
        let err = read_records(&input[..], &mut storage).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { line: 2 }));
    }

    #[test]
    fn bad_amount_aborts_the_load() {
        let mut storage = RecordStorage::default();
        let input = b"1234:Zoe Hart:19-01-01:D:ten dollars\n";
        let err = read_records(&input[..], &mut storage).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { .. }));
    }

    #[test]
    fn bad_kind_aborts_the_load() {
        let mut storage = RecordStorage::default();
        let input = b"1234:Zoe Hart:19-01-01:X:10.00\n";
        let err = read_records(&input[..], &mut storage).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { .. }));
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = std::env::temp_dir().join(format!("accounts-no-such-{}.txt", std::process::id()));
        let ledger = load(&path).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn loaded_ledger_groups_by_account() {
        let mut ledger = Ledger::new();
        let input = b"\
1234:Zoe Hart:19-01-01:D:100.00
0042:Abe Ford:18-12-25:D:5.50
1234:Zoe Hart:19-01-02:W:30.00
";
        read_records(&input[..], &mut ledger).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.balance("1234"), dec!(70.00));
        assert_eq!(ledger.holder_name("0042"), Some("Abe Ford"));
    }
}

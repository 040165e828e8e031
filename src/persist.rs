use crate::data::StoreError;
use crate::ledger::Ledger;
use crate::write::write_records;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn temp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ledger".to_string());
    target.with_file_name(format!(".{name}.tmp"))
}

fn write_to(path: &Path, ledger: &Ledger) -> Result<(), StoreError> {
    let mut writer = std::io::BufWriter::new(fs::File::create(path)?);
    write_records(&mut writer, ledger)?;
    writer.flush()?;
    Ok(())
}

/// Flushes the whole ledger to `target`, all or nothing. The serialized form
/// goes to a temporary file in the target's directory first and is renamed
/// over the target only once the write has fully succeeded, so an external
/// reader never sees a partially written file. On any failure the temporary
/// file is removed and the original file is left byte-for-byte as it was.
pub(crate) fn save(ledger: &Ledger, target: &Path) -> Result<(), StoreError> {
    let tmp = temp_path(target);
    if let Err(e) = write_to(&tmp, ledger) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::Persistence(e));
    }
    log::info!(
        "flushed {} accounts to {}",
        ledger.len(),
        target.display()
    );
    Ok(())
}

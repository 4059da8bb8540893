//! JSON / JSONL I/O and atomic file operations

use serde::Serialize;
use std::path::Path;

/// One compact JSON document per record, each terminated by a newline
pub fn to_jsonl<T: Serialize>(records: &[T]) -> serde_json::Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// Replace `path` with one JSON document per record
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> std::io::Result<()> {
    let data = to_jsonl(records)?;
    atomic_write(path, data.as_bytes())
}

/// Replace `path` with the pretty-printed JSON of `value`
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> std::io::Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    atomic_write(path, &data)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

//! Tolerant file reading and output writing.

use std::fs;
use std::path::Path;

use crate::error::Result;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Read a file as text, trying UTF-8 (with or without a BOM) before falling
/// back to Latin-1 and finally a lossy UTF-8 decode. Undecodable bytes are
/// never fatal; only the underlying I/O failure is.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let bytes = match bytes.strip_prefix(&UTF8_BOM) {
        Some(rest) => rest.to_vec(),
        None => bytes,
    };

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let bytes = err.into_bytes();
            if bytes.iter().all(|&b| b < 0x80 || b >= 0xA0) {
                // Latin-1 maps each byte to the same code point. Bytes in the
                // C1 control range are taken as mojibake, not Latin-1 text.
                Ok(bytes.iter().map(|&b| b as char).collect())
            } else {
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

/// Write the aggregated document, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

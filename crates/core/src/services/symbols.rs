//! Imported-symbol and COFF-name extraction.

use thiserror::Error;

use crate::image::PeImage;
use crate::model::{CoffName, ImportedSymbol};
use crate::services::InspectError;

/// String-table offsets below this point land inside the 4-byte length
/// prefix and cannot name a symbol.
const STRING_TABLE_PREFIX: usize = 4;

/// Resolution failure for a single COFF symbol entry.
///
/// Never fatal to the extraction loop; each failure is recorded against its
/// entry index and the remaining entries still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("string table offset {offset} out of bounds (table size {table_len})")]
    OffsetOutOfBounds { offset: u32, table_len: usize },
    #[error("string at offset {offset} is not NUL-terminated")]
    UnterminatedName { offset: u32 },
    #[error("symbol name is not valid UTF-8")]
    InvalidUtf8,
}

/// A recorded per-entry resolution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoffNameFailure {
    /// Index of the offending entry in the symbol table.
    pub index: usize,
    pub error: SymbolError,
}

/// Outcome of resolving every COFF symbol name.
///
/// `names` holds the successful resolutions in original table order (failed
/// entries skipped); `failures` holds every per-entry error, so no earlier
/// failure is discarded by a later one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoffNameReport {
    pub names: Vec<String>,
    pub failures: Vec<CoffNameFailure>,
}

/// The symbols this image imports from other modules.
///
/// Fails with [`InspectError::ImportTableUnavailable`] when the image carries
/// no import directory at all. An empty list is a success: callers can tell
/// "imports nothing" apart from "has no import table".
pub fn imported_symbols(image: &PeImage) -> Result<&[ImportedSymbol], InspectError> {
    image
        .imports
        .as_deref()
        .ok_or(InspectError::ImportTableUnavailable)
}

/// Resolve every COFF symbol entry to its full name.
///
/// Short inline names decode directly; long names are looked up in the shared
/// string table with the offset validated against the table bounds. A single
/// bad entry never aborts the loop.
pub fn coff_symbol_names(image: &PeImage) -> CoffNameReport {
    let mut report = CoffNameReport::default();
    for (index, entry) in image.coff_symbols.iter().enumerate() {
        match resolve_name(&entry.name, &image.string_table) {
            Ok(name) => report.names.push(name),
            Err(error) => report.failures.push(CoffNameFailure { index, error }),
        }
    }
    report
}

fn resolve_name(name: &CoffName, string_table: &[u8]) -> Result<String, SymbolError> {
    match *name {
        CoffName::Inline(bytes) => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            std::str::from_utf8(&bytes[..end])
                .map(str::to_string)
                .map_err(|_| SymbolError::InvalidUtf8)
        }
        CoffName::TableOffset(offset) => {
            let start = offset as usize;
            if start < STRING_TABLE_PREFIX || start >= string_table.len() {
                return Err(SymbolError::OffsetOutOfBounds {
                    offset,
                    table_len: string_table.len(),
                });
            }
            let tail = &string_table[start..];
            let end = tail
                .iter()
                .position(|&b| b == 0)
                .ok_or(SymbolError::UnterminatedName { offset })?;
            std::str::from_utf8(&tail[..end])
                .map(str::to_string)
                .map_err(|_| SymbolError::InvalidUtf8)
        }
    }
}

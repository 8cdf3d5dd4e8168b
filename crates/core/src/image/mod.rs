//! Goblin-backed PE image loader.
//!
//! [`PeImage::parse`] runs the container parser exactly once and materializes
//! an owned, read-only model of everything the inspection services need:
//! the section table (in on-disk order, with raw bytes), the tagged optional
//! header, the import list (when an import directory exists), and the raw
//! COFF symbol records plus the shared string-table blob.
//!
//! All services borrow from the image for the duration of a call; the image
//! itself is never mutated after parse.

use goblin::pe::PE;
use log::debug;
use thiserror::Error;

use crate::model::{
    CoffName, CoffSymbolEntry, DisasmMode, ImportedSymbol, OptionalHeaderVariant, Section,
};

/// Optional-header magic for PE32.
const PE32_MAGIC: u16 = 0x10B;
/// Optional-header magic for PE32+.
const PE32_PLUS_MAGIC: u16 = 0x20B;

/// Size of one on-disk COFF symbol record.
const COFF_SYMBOL_SIZE: usize = 18;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to parse PE container: {0}")]
    Malformed(#[from] goblin::error::Error),
}

/// A fully parsed PE image, owning every byte the services borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeImage {
    /// Sections in section-table order. Names may repeat.
    pub sections: Vec<Section>,
    /// Optional header, tagged once at parse time.
    pub optional_header: OptionalHeaderVariant,
    /// Imported symbols, or `None` when the image has no import directory.
    /// An image with an import directory but no entries is `Some(vec![])`.
    pub imports: Option<Vec<ImportedSymbol>>,
    /// Primary COFF symbol records, auxiliary records already skipped.
    pub coff_symbols: Vec<CoffSymbolEntry>,
    /// Shared COFF string table, including its 4-byte length prefix so
    /// on-disk offsets index it directly. Empty when the image has none.
    pub string_table: Vec<u8>,
}

impl PeImage {
    /// Parse a PE binary from its raw file bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, ImageError> {
        let pe = PE::parse(bytes)?;

        let sections = pe
            .sections
            .iter()
            .map(|sec| Section {
                name: sec.name().unwrap_or_default().to_string(),
                virtual_address: sec.virtual_address,
                data: section_bytes(
                    bytes,
                    sec.pointer_to_raw_data as usize,
                    sec.size_of_raw_data as usize,
                ),
            })
            .collect();

        let optional_header = match pe.header.optional_header {
            Some(opt) => {
                let standard = opt.standard_fields;
                let windows = opt.windows_fields;
                match standard.magic {
                    PE32_MAGIC => OptionalHeaderVariant::Pe32 {
                        entry_point: standard.address_of_entry_point as u32,
                        base_of_code: standard.base_of_code as u32,
                        image_base: windows.image_base as u32,
                    },
                    PE32_PLUS_MAGIC => OptionalHeaderVariant::Pe32Plus {
                        entry_point: standard.address_of_entry_point,
                        base_of_code: standard.base_of_code,
                        image_base: windows.image_base,
                    },
                    magic => OptionalHeaderVariant::Unrecognized { magic },
                }
            }
            // No optional header at all (e.g. a bare COFF object).
            None => OptionalHeaderVariant::Unrecognized { magic: 0 },
        };

        // `import_data` distinguishes "no import directory" from "an import
        // directory with zero entries"; `imports` alone cannot.
        let imports = if pe.import_data.is_some() {
            Some(
                pe.imports
                    .iter()
                    .map(|imp| ImportedSymbol {
                        name: imp.name.to_string(),
                        library: imp.dll.to_string(),
                    })
                    .collect(),
            )
        } else {
            None
        };

        let coff = pe.header.coff_header;
        let (coff_symbols, string_table) = parse_coff_symbols(
            bytes,
            coff.pointer_to_symbol_table as usize,
            coff.number_of_symbol_table as usize,
        );

        debug!(
            "parsed image: {} sections, {} coff symbols, imports {}",
            pe.sections.len(),
            coff_symbols.len(),
            if imports.is_some() { "present" } else { "absent" }
        );

        Ok(PeImage { sections, optional_header, imports, coff_symbols, string_table })
    }

    /// The disassembly mode declared by the image's optional header, or
    /// `None` when the header variant is unrecognized.
    pub fn mode(&self) -> Option<DisasmMode> {
        match self.optional_header {
            OptionalHeaderVariant::Pe32 { .. } => Some(DisasmMode::Bits32),
            OptionalHeaderVariant::Pe32Plus { .. } => Some(DisasmMode::Bits64),
            OptionalHeaderVariant::Unrecognized { .. } => None,
        }
    }
}

/// Copy a section's raw bytes, clamped to the file buffer so a truncated or
/// hostile section header cannot read out of bounds.
fn section_bytes(bytes: &[u8], start: usize, size: usize) -> Vec<u8> {
    if start >= bytes.len() {
        return Vec::new();
    }
    let end = start.saturating_add(size).min(bytes.len());
    bytes[start..end].to_vec()
}

/// Walk the raw COFF symbol table, collecting primary records and the string
/// table blob that follows it.
///
/// Records are 18 bytes; a record whose first four name bytes are zero stores
/// a string-table offset in the next four. Auxiliary records are not symbols
/// and are skipped using the preceding record's aux count, exactly as the
/// on-disk format dictates.
fn parse_coff_symbols(
    bytes: &[u8],
    table_offset: usize,
    symbol_count: usize,
) -> (Vec<CoffSymbolEntry>, Vec<u8>) {
    let mut symbols = Vec::new();
    if table_offset == 0 || symbol_count == 0 {
        return (symbols, Vec::new());
    }

    let mut index = 0usize;
    while index < symbol_count {
        let start = table_offset + index * COFF_SYMBOL_SIZE;
        let Some(record) = bytes.get(start..start + COFF_SYMBOL_SIZE) else {
            debug!("coff symbol table truncated at record {index}");
            break;
        };
        let name = if record[0] == 0 && record[1] == 0 && record[2] == 0 && record[3] == 0 {
            CoffName::TableOffset(u32::from_le_bytes([record[4], record[5], record[6], record[7]]))
        } else {
            CoffName::Inline([
                record[0], record[1], record[2], record[3], record[4], record[5], record[6],
                record[7],
            ])
        };
        let aux_count = record[17];
        symbols.push(CoffSymbolEntry { name, aux_count });
        index += 1 + aux_count as usize;
    }

    // The string table sits immediately after the symbol table; its first
    // four bytes give the total size including the length field itself.
    let strings_start = table_offset + symbol_count * COFF_SYMBOL_SIZE;
    let string_table = match bytes.get(strings_start..strings_start + 4) {
        Some(len_bytes) => {
            let declared = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]])
                as usize;
            let end = strings_start.saturating_add(declared.max(4)).min(bytes.len());
            bytes[strings_start..end].to_vec()
        }
        None => Vec::new(),
    };

    (symbols, string_table)
}

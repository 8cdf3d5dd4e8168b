//! Core data model for PE inspection results.
//!
//! Everything here is a plain, read-only value derived from an already-parsed
//! image. The services never mutate or persist these types; frontends decide
//! how to render them.

use serde::{Deserialize, Serialize};

/// The optional header as tagged at image-parse time.
///
/// The tag is fixed once by [`crate::image::PeImage::parse`] from the
/// optional-header magic and never reinterpreted afterwards. Field widths
/// match the variant: `Pe32` carries 32-bit values, `Pe32Plus` 64-bit ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionalHeaderVariant {
    /// PE32 (magic 0x10B).
    Pe32 { entry_point: u32, base_of_code: u32, image_base: u32 },
    /// PE32+ (magic 0x20B).
    Pe32Plus { entry_point: u64, base_of_code: u64, image_base: u64 },
    /// Anything else, including an image with no optional header at all
    /// (recorded as magic 0). Resolution of this variant always fails.
    Unrecognized { magic: u16 },
}

/// Common field set produced by header resolution.
///
/// Mirrors the native widths of the source variant so no value is silently
/// widened or truncated on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedHeader {
    Bits32 { entry_point: u32, base_of_code: u32, image_base: u32 },
    Bits64 { entry_point: u64, base_of_code: u64, image_base: u64 },
}

/// A named region of the image with its raw on-disk bytes.
///
/// Names come straight from the section table: short, possibly non-unique,
/// listed in table order. `data` is opaque binary content; any text
/// interpretation is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub virtual_address: u32,
    pub data: Vec<u8>,
}

/// An external routine referenced by the image, qualified by the module
/// that provides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedSymbol {
    pub name: String,
    pub library: String,
}

/// Name field of a raw COFF symbol record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoffName {
    /// Short name stored inline, NUL-padded to 8 bytes.
    Inline([u8; 8]),
    /// Offset into the shared string table (relative to the table start,
    /// which begins with a 4-byte length prefix).
    TableOffset(u32),
}

/// A primary COFF symbol record. Auxiliary records are skipped at parse time;
/// their count is retained for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffSymbolEntry {
    pub name: CoffName,
    pub aux_count: u8,
}

/// Architecture width for the disassembly pipeline.
///
/// Always supplied explicitly by the caller; there is no engine-wide default,
/// so one pipeline serves both 32- and 64-bit images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisasmMode {
    Bits32,
    Bits64,
}

/// One decoded machine instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Absolute address: sweep base plus byte offset.
    pub address: u64,
    pub mnemonic: String,
    pub operands: String,
    /// Decoded length in bytes, always >= 1.
    pub len: usize,
}

/// Terminal marker recorded when a sweep could not consume its whole buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeFailure {
    /// Byte offset (relative to the start of the buffer) where decoding halted.
    pub offset: usize,
    pub reason: String,
}

/// Result of a linear-sweep disassembly.
///
/// Instructions are in strictly increasing, non-overlapping address order.
/// `failure` is `Some` only when the sweep halted before the end of the
/// buffer; the decoded prefix is still returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disassembly {
    pub instructions: Vec<Instruction>,
    pub failure: Option<DecodeFailure>,
}

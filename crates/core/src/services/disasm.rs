//! Linear-sweep disassembly over raw code bytes.
//!
//! The engine is Capstone, wrapped as a scoped resource: one [`Disassembler`]
//! per architecture mode, safely reusable across unrelated buffers because no
//! cross-call state is retained between sweeps.

use capstone::arch::x86::ArchMode;
use capstone::arch::BuildsCapstone;
use capstone::Capstone;
use thiserror::Error;

use crate::model::{DecodeFailure, Disassembly, DisasmMode, Instruction};

#[derive(Debug, Error)]
pub enum DisasmError {
    #[error("capstone init failed: {0}")]
    Engine(String),
}

/// A reusable instruction decoder for one architecture mode.
pub struct Disassembler {
    cs: Capstone,
}

impl Disassembler {
    /// Build an x86 decoder for the given width.
    ///
    /// The mode is an explicit parameter rather than an engine-wide default,
    /// so the same pipeline serves 32- and 64-bit images alike.
    pub fn new(mode: DisasmMode) -> Result<Self, DisasmError> {
        let arch_mode = match mode {
            DisasmMode::Bits32 => ArchMode::Mode32,
            DisasmMode::Bits64 => ArchMode::Mode64,
        };
        let cs = Capstone::new()
            .x86()
            .mode(arch_mode)
            .build()
            .map_err(|e| DisasmError::Engine(e.to_string()))?;
        Ok(Disassembler { cs })
    }

    /// Forward linear sweep of `code` starting at offset 0.
    ///
    /// Each decoded instruction is emitted at `base + offset` and the sweep
    /// advances by the decoded length. On the first undecodable position the
    /// sweep halts and returns every instruction decoded so far plus a
    /// [`DecodeFailure`] naming the offending offset; malformed or
    /// adversarial input is expected and never panics. An empty buffer
    /// yields an empty sequence with no failure marker.
    pub fn sweep(&self, code: &[u8], base: u64) -> Disassembly {
        let mut instructions = Vec::new();
        let mut offset = 0usize;

        while offset < code.len() {
            // Wrap rather than overflow: the sweep must not panic for any
            // caller-supplied base address.
            let address = base.wrapping_add(offset as u64);
            let decoded = match self.cs.disasm_count(&code[offset..], address, 1) {
                Ok(decoded) => decoded,
                Err(e) => {
                    return halted(instructions, offset, e.to_string());
                }
            };
            let Some(insn) = decoded.iter().next() else {
                return halted(instructions, offset, "no valid instruction at offset".into());
            };
            let len = insn.bytes().len();
            if len == 0 {
                // A zero-length decode would pin the sweep in place forever;
                // treat the decoder contract violation as a halt.
                return halted(instructions, offset, "decoder reported a zero-length instruction".into());
            }
            instructions.push(Instruction {
                address,
                mnemonic: insn.mnemonic().unwrap_or("").to_string(),
                operands: insn.op_str().unwrap_or("").to_string(),
                len,
            });
            offset += len;
        }

        Disassembly { instructions, failure: None }
    }
}

fn halted(instructions: Vec<Instruction>, offset: usize, reason: String) -> Disassembly {
    Disassembly { instructions, failure: Some(DecodeFailure { offset, reason }) }
}

/// One-shot convenience wrapper: build a decoder for `mode` and sweep `code`.
pub fn disassemble(code: &[u8], base: u64, mode: DisasmMode) -> Result<Disassembly, DisasmError> {
    Ok(Disassembler::new(mode)?.sweep(code, base))
}

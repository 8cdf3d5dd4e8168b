#![allow(dead_code)]

//! Minimal hand-assembled PE32+ fixture for CLI tests.
//!
//! Mirrors the richer builder in the core crate's tests: `.text` + `.data`,
//! a two-entry COFF symbol table, and no import directory.

use std::path::PathBuf;

pub const TEXT_BYTES: [u8; 8] = [0x55, 0x48, 0x89, 0xE5, 0x90, 0x90, 0x5D, 0xC3];
pub const DATA_BYTES: [u8; 8] = [0x00, 0xFF, 0x7F, 0x80, 0x0A, b'H', b'i', 0x00];
pub const LONG_SYMBOL_NAME: &str = "a_long_function_name_for_strtab";
pub const IMAGE_BASE: u64 = 0x1_4000_0000;

fn put_u16(buf: &mut [u8], off: usize, v: u16) {
    buf[off..off + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_u32(buf: &mut [u8], off: usize, v: u32) {
    buf[off..off + 4].copy_from_slice(&v.to_le_bytes());
}

fn put_u64(buf: &mut [u8], off: usize, v: u64) {
    buf[off..off + 8].copy_from_slice(&v.to_le_bytes());
}

fn put_bytes(buf: &mut [u8], off: usize, v: &[u8]) {
    buf[off..off + v.len()].copy_from_slice(v);
}

pub fn pe64_image() -> Vec<u8> {
    const SYM_PTR: usize = 0x500;
    const SYM_COUNT: usize = 2;
    let strtab_start = SYM_PTR + SYM_COUNT * 18;
    let strtab_size = 4 + LONG_SYMBOL_NAME.len() + 1;
    let mut buf = vec![0u8; strtab_start + strtab_size];

    put_bytes(&mut buf, 0, b"MZ");
    put_u32(&mut buf, 0x3C, 0x80);
    put_bytes(&mut buf, 0x80, b"PE\0\0");

    let coff = 0x84;
    put_u16(&mut buf, coff, 0x8664);
    put_u16(&mut buf, coff + 2, 2);
    put_u32(&mut buf, coff + 8, SYM_PTR as u32);
    put_u32(&mut buf, coff + 12, SYM_COUNT as u32);
    put_u16(&mut buf, coff + 16, 240);
    put_u16(&mut buf, coff + 18, 0x0022);

    let opt = coff + 20;
    put_u16(&mut buf, opt, 0x20B);
    put_u32(&mut buf, opt + 16, 0x1000); // entry point
    put_u32(&mut buf, opt + 20, 0x1000); // base of code
    put_u64(&mut buf, opt + 24, IMAGE_BASE);
    put_u32(&mut buf, opt + 32, 0x1000);
    put_u32(&mut buf, opt + 36, 0x200);
    put_u16(&mut buf, opt + 40, 6);
    put_u16(&mut buf, opt + 48, 6);
    put_u32(&mut buf, opt + 56, 0x3000);
    put_u32(&mut buf, opt + 60, 0x200);
    put_u16(&mut buf, opt + 68, 3);
    put_u32(&mut buf, opt + 108, 16);

    let sec = opt + 240;
    put_bytes(&mut buf, sec, b".text");
    put_u32(&mut buf, sec + 8, TEXT_BYTES.len() as u32);
    put_u32(&mut buf, sec + 12, 0x1000);
    put_u32(&mut buf, sec + 16, TEXT_BYTES.len() as u32);
    put_u32(&mut buf, sec + 20, 0x200);
    put_u32(&mut buf, sec + 36, 0x6000_0020);

    put_bytes(&mut buf, sec + 40, b".data");
    put_u32(&mut buf, sec + 48, DATA_BYTES.len() as u32);
    put_u32(&mut buf, sec + 52, 0x2000);
    put_u32(&mut buf, sec + 56, DATA_BYTES.len() as u32);
    put_u32(&mut buf, sec + 60, 0x400);
    put_u32(&mut buf, sec + 76, 0xC000_0040);

    put_bytes(&mut buf, 0x200, &TEXT_BYTES);
    put_bytes(&mut buf, 0x400, &DATA_BYTES);

    let sym0 = SYM_PTR;
    put_bytes(&mut buf, sym0, b"start");
    put_u16(&mut buf, sym0 + 12, 1);
    put_u16(&mut buf, sym0 + 14, 0x20);
    buf[sym0 + 16] = 2;

    let sym1 = SYM_PTR + 18;
    put_u32(&mut buf, sym1 + 4, 4);
    put_u16(&mut buf, sym1 + 12, 1);
    put_u16(&mut buf, sym1 + 14, 0x20);
    buf[sym1 + 16] = 2;

    put_u32(&mut buf, strtab_start, strtab_size as u32);
    put_bytes(&mut buf, strtab_start + 4, LONG_SYMBOL_NAME.as_bytes());

    buf
}

/// Write the PE32+ fixture into `dir` and return its path.
pub fn write_pe64_fixture(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("sample.exe");
    std::fs::write(&path, pe64_image()).expect("write fixture binary");
    path
}

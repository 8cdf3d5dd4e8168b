use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Read a target binary into memory.
///
/// The core is byte-oriented and performs no I/O itself; this is the single
/// place the CLI touches the filesystem for input.
pub fn read_binary(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read binary: {}", path.display()))
}

/// Write raw bytes to a file, or to stdout when no path is given.
///
/// Section content is opaque binary data, so it goes out unmodified; piping
/// to a file or a tool like `xxd` is the expected use.
pub fn write_bytes(out: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match out {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("Failed to write section dump: {}", path.display())),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(bytes).context("Failed to write section dump to stdout")?;
            handle.flush().context("Failed to flush stdout")
        }
    }
}

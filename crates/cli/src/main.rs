use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pescope::{read_binary, write_bytes};
use pescope_core::image::PeImage;
use pescope_core::model::ResolvedHeader;
use pescope_core::services::{disasm, header, sections, symbols};

/// PE inspection CLI.
///
/// This CLI is a thin wrapper around `pescope-core` (exposed in code as
/// `pescope_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "pescope",
    version,
    about = "PE inspection and linear-sweep disassembly",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List section names in section-table order (duplicates preserved).
    Sections {
        /// Path to the PE binary to inspect.
        binary: PathBuf,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the symbols this binary imports from other modules.
    ///
    /// A binary without an import directory is reported as an error; a
    /// binary whose import table is simply empty is not.
    Imports {
        /// Path to the PE binary to inspect.
        binary: PathBuf,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Resolve COFF symbol names, reporting per-entry failures alongside
    /// the names that did resolve.
    Coff {
        /// Path to the PE binary to inspect.
        binary: PathBuf,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show entry point, base of code, and image base from the optional
    /// header.
    Header {
        /// Path to the PE binary to inspect.
        binary: PathBuf,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Dump a section's raw bytes, unmodified.
    ///
    /// The output is binary, not text; redirect it or use --out.
    Dump {
        /// Path to the PE binary to inspect.
        binary: PathBuf,

        /// Exact name of the section to dump.
        #[arg(long)]
        section: String,

        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Disassemble a code section with a forward linear sweep, using the
    /// architecture the image itself declares.
    Disasm {
        /// Path to the PE binary to inspect.
        binary: PathBuf,

        /// Section to disassemble.
        #[arg(long, default_value = ".text")]
        section: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Sections { binary, json } => sections_command(&binary, json),
        Command::Imports { binary, json } => imports_command(&binary, json),
        Command::Coff { binary, json } => coff_command(&binary, json),
        Command::Header { binary, json } => header_command(&binary, json),
        Command::Dump { binary, section, out } => dump_command(&binary, &section, out.as_deref()),
        Command::Disasm { binary, section, json } => disasm_command(&binary, &section, json),
    }
}

fn sections_command(binary: &std::path::Path, json: bool) -> Result<()> {
    let bytes = read_binary(binary)?;
    let image = PeImage::parse(&bytes)?;

    let names = sections::list(&image);
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        println!("Sections ({}):", names.len());
        for name in names {
            println!("  - {name}");
        }
    }
    Ok(())
}

fn imports_command(binary: &std::path::Path, json: bool) -> Result<()> {
    let bytes = read_binary(binary)?;
    let image = PeImage::parse(&bytes)?;

    let imports = symbols::imported_symbols(&image)
        .with_context(|| format!("{} carries no import directory", binary.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(imports)?);
    } else {
        println!("Imports ({}):", imports.len());
        if imports.is_empty() {
            println!("  (none)");
            return Ok(());
        }
        for imp in imports {
            println!("  - {}!{}", imp.library, imp.name);
        }
    }
    Ok(())
}

fn coff_command(binary: &std::path::Path, json: bool) -> Result<()> {
    let bytes = read_binary(binary)?;
    let image = PeImage::parse(&bytes)?;

    let report = symbols::coff_symbol_names(&image);
    if json {
        let failures: Vec<_> = report
            .failures
            .iter()
            .map(|f| serde_json::json!({ "index": f.index, "error": f.error.to_string() }))
            .collect();
        let doc = serde_json::json!({ "names": report.names, "failures": failures });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("COFF symbols ({}):", report.names.len());
        for name in &report.names {
            println!("  - {name}");
        }
        if !report.failures.is_empty() {
            println!("Unresolved entries ({}):", report.failures.len());
            for failure in &report.failures {
                println!("  - entry {}: {}", failure.index, failure.error);
            }
        }
    }
    Ok(())
}

fn header_command(binary: &std::path::Path, json: bool) -> Result<()> {
    let bytes = read_binary(binary)?;
    let image = PeImage::parse(&bytes)?;

    let resolved = header::resolve(&image.optional_header)?;
    let (width, entry_point, base_of_code, image_base) = match resolved {
        ResolvedHeader::Bits32 { entry_point, base_of_code, image_base } => {
            (32, u64::from(entry_point), u64::from(base_of_code), u64::from(image_base))
        }
        ResolvedHeader::Bits64 { entry_point, base_of_code, image_base } => {
            (64, entry_point, base_of_code, image_base)
        }
    };

    if json {
        let doc = serde_json::json!({
            "width": width,
            "entry_point": entry_point,
            "base_of_code": base_of_code,
            "image_base": image_base,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("Optional header (PE32{}):", if width == 64 { "+" } else { "" });
        println!("  Entry point:  {entry_point:#x}");
        println!("  Base of code: {base_of_code:#x}");
        println!("  Image base:   {image_base:#x}");
    }
    Ok(())
}

fn dump_command(binary: &std::path::Path, section: &str, out: Option<&std::path::Path>) -> Result<()> {
    let bytes = read_binary(binary)?;
    let image = PeImage::parse(&bytes)?;

    let data = sections::dump(&image, section)
        .with_context(|| format!("Failed to dump a section of {}", binary.display()))?;
    write_bytes(out, data)
}

fn disasm_command(binary: &std::path::Path, section: &str, json: bool) -> Result<()> {
    let bytes = read_binary(binary)?;
    let image = PeImage::parse(&bytes)?;

    let mode = image
        .mode()
        .context("cannot pick a disassembly mode: optional header variant is unrecognized")?;
    let sec = sections::find(&image, section)
        .with_context(|| format!("Failed to disassemble {}", binary.display()))?;

    let result = disasm::disassemble(&sec.data, u64::from(sec.virtual_address), mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for insn in &result.instructions {
        let text = format!("{} {}", insn.mnemonic, insn.operands);
        println!("{:#010x}  {}", insn.address, text.trim());
    }
    if let Some(failure) = &result.failure {
        eprintln!("decode halted at offset {:#x}: {}", failure.offset, failure.reason);
    }
    Ok(())
}

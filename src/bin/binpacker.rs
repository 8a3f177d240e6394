//! binpacker Command Line Interface
//!
//! Packs command-line values into a binary record, or unpacks a record into
//! named fields.
//!
//! Usage:
//!   binpacker pack nNa5xa1 1 2 Hello '!'           # hex to stdout
//!   binpacker pack nNa5 1 2 Hello -o record.bin    # bytes to a file
//!   binpacker unpack nfred/Njim/a5shiela record.bin
//!   binpacker unpack nfred/Njim/a5shiela -         # read stdin
//!
//! Set `RUST_LOG=debug` to see skipped segments and truncated packs.

use binpacker::{parse_pack_format, Directive, Endianness, Packer, Value};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

/// The arguments to the program.
#[derive(Debug, Parser)]
#[command(
    name = "binpacker",
    version,
    about = "Pack and unpack binary records with Perl pack-style formats"
)]
struct Arguments {
    /// Encode integers least significant byte first.
    #[arg(short, long, global = true)]
    little_endian: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pack values according to a positional format such as `nNa5xa1`.
    Pack {
        /// The pack format.
        format: String,

        /// One value per `n`, `N` or `a` directive.
        values: Vec<String>,

        /// Write raw bytes here instead of hex to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Unpack a record according to a named format such as `nid/a*xname`.
    Unpack {
        /// The unpack format.
        format: String,

        /// Input file, or `-` for stdin.
        input: PathBuf,
    },
}

/// Turn command-line strings into values matching the format's directives.
fn typed_values(format: &str, raw: &[String]) -> Result<Vec<Value>, String> {
    let directives = parse_pack_format(format).map_err(|e| format!("Bad format: {e}"))?;
    let mut slots = directives.into_iter().filter(|d| d.consumes_value());

    raw.iter()
        .map(|arg| match slots.next() {
            Some(Directive::UInt16) => arg
                .parse::<u16>()
                .map(Value::UInt16)
                .map_err(|_| format!("{arg:?} is not a 16-bit unsigned integer")),
            Some(Directive::UInt32) => arg
                .parse::<u32>()
                .map(Value::UInt32)
                .map_err(|_| format!("{arg:?} is not a 32-bit unsigned integer")),
            _ => Ok(Value::Text(arg.clone())),
        })
        .collect()
}

/// Render bytes as space-separated hex pairs.
fn to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<Vec<u8>, String> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        return Ok(buffer);
    }

    fs::read(path).map_err(|e| format!("Cannot open input file: {e}"))
}

/// Pack values and emit the record.
fn do_pack(
    packer: Packer,
    format: &str,
    raw: &[String],
    output: Option<&Path>,
) -> Result<(), String> {
    let values = typed_values(format, raw)?;
    let bytes = packer
        .pack(format, &values)
        .map_err(|e| format!("Packing failed: {e}"))?;

    match output {
        Some(path) => {
            fs::write(path, &bytes).map_err(|e| format!("Cannot write output file: {e}"))?;
            println!("Output:      {} ({} bytes)", path.display(), bytes.len());
        }
        None => println!("{}", to_hex(&bytes)),
    }

    Ok(())
}

/// Unpack a record and print its fields in order.
fn do_unpack(packer: Packer, format: &str, input: &Path) -> Result<(), String> {
    let data = read_input(input)?;
    let fields = packer
        .unpack(format, &data)
        .map_err(|e| format!("Unpacking failed: {e}"))?;

    for (name, value) in fields.iter() {
        println!("{name} = {value}");
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Arguments::parse();
    let packer = Packer::new(if args.little_endian {
        Endianness::Little
    } else {
        Endianness::Big
    });

    let result = match &args.command {
        Command::Pack {
            format,
            values,
            output,
        } => do_pack(packer, format, values, output.as_deref()),
        Command::Unpack { format, input } => do_unpack(packer, format, input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

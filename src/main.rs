// SFCScript - SNES address conversion and table-driven script extraction
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! SFCScript CLI
//!
//! Address conversion and script extraction for SNES cartridge images.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use log::info;

use sfcscript::address::{parse_hex_address, AddressSpace, DEFAULT_CACHE_CAPACITY};
use sfcscript::codec::{BlockBoundaryDetector, DEFAULT_MAX_WIDTH};
use sfcscript::error::{format_error, ErrorCode, Result, ToolError};
use sfcscript::extract::{load_image, IdentifierStyle};
use sfcscript::job::{AddressLiteral, Job, JobGroup, JobTable};
use sfcscript::output::{render_script, write_extraction, OutputPaths};
use sfcscript::{AddressConverter, AddressFormat, AddressValue, Scheme, SymbolTable, TextCodec};

/// SFCScript - SNES address conversion and script extraction
#[derive(Parser, Debug)]
#[command(name = "sfcscript")]
#[command(version)]
#[command(about = "SNES address conversion and table-driven script extraction")]
#[command(long_about = r#"
SFCScript converts addresses between SNES cartridge mapping schemes and
linear image offsets, and pulls text out of images through character
tables and pointer tables.

Example usage:
  sfcscript convert '$C08000' --from hirom
  sfcscript decode game.tbl block.bin
  sfcscript encode game.tbl "Hello[FE]" -o hello.bin
  sfcscript extract game.sfc --table game.tbl --pointers 0x1B0000:0x200 --header
  sfcscript job dump.toml
"#)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an address in every mapping scheme
    Convert {
        /// Address in hex, with or without 0x or $
        address: String,

        /// Space the address is given in: pc, headered or a scheme name
        #[arg(long, default_value = "pc")]
        from: AddressSpace,

        /// The image carries a 512-byte copier header
        #[arg(long)]
        header: bool,

        /// Let LoROM1 and LoROM2 retry each other
        #[arg(long)]
        fallback: bool,

        /// Print decimal instead of hex
        #[arg(long)]
        decimal: bool,

        /// Prefix for hex output
        #[arg(long, default_value = "0x")]
        prefix: String,
    },

    /// Decode a binary file or a slice of it
    Decode {
        /// Character table
        table: PathBuf,

        /// Binary input
        file: PathBuf,

        /// Widest code tried, in bytes
        #[arg(short, long, default_value_t = DEFAULT_MAX_WIDTH)]
        width: usize,

        /// Hex offset to start at
        #[arg(long, default_value = "0")]
        offset: String,

        /// Hex length; without it decoding stops at the block terminator
        #[arg(long)]
        length: Option<String>,
    },

    /// Encode text to bytes
    Encode {
        /// Character table
        table: PathBuf,

        /// Text to encode
        text: String,

        /// Output file; hex is printed when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract the text behind one or more pointer tables
    Extract {
        /// Cartridge image
        rom: PathBuf,

        /// Character table
        #[arg(short, long)]
        table: PathBuf,

        /// Pointer tables as START:LENGTH linear hex offsets
        #[arg(short, long = "pointers", required = true, num_args = 1..)]
        pointers: Vec<String>,

        /// Name of the output files
        #[arg(short, long, default_value = "script")]
        name: String,

        /// Output directory
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,

        /// Bank byte for every pointer, in hex
        #[arg(long)]
        bank: Option<String>,

        /// Pointer width in bytes (2 or 3)
        #[arg(long, default_value_t = 2)]
        pointer_width: usize,

        /// Mapping scheme the pointers are written in
        #[arg(long, default_value = "lorom1")]
        scheme: Scheme,

        /// Do not retry rejected LoROM pointers as the other LoROM variant
        #[arg(long)]
        no_fallback: bool,

        /// Identifier style for script headers
        #[arg(long, default_value = "combined")]
        id_style: IdentifierStyle,

        /// Widest code tried, in bytes
        #[arg(short, long, default_value_t = DEFAULT_MAX_WIDTH)]
        width: usize,

        /// The image carries a 512-byte copier header
        #[arg(long)]
        header: bool,

        /// Print the script instead of writing files
        #[arg(long)]
        no_output: bool,
    },

    /// Run a job file
    Job {
        /// Job description (TOML)
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let result = match cli.command {
        Command::Convert {
            address,
            from,
            header,
            fallback,
            decimal,
            prefix,
        } => convert(&address, from, header, fallback, decimal, prefix),
        Command::Decode {
            table,
            file,
            width,
            offset,
            length,
        } => decode(&table, &file, width, &offset, length.as_deref()),
        Command::Encode {
            table,
            text,
            output,
        } => encode(&table, &text, output.as_deref()),
        Command::Extract {
            rom,
            table,
            pointers,
            name,
            out_dir,
            bank,
            pointer_width,
            scheme,
            no_fallback,
            id_style,
            width,
            header,
            no_output,
        } => {
            let mut group = JobGroup::new(name);
            group.id_style = id_style;
            group.scheme = scheme;
            group.pointer_width = pointer_width;
            group.bank = bank.map(AddressLiteral::Text);
            group.fallback = !no_fallback;
            group.output = !no_output;
            match pointers
                .iter()
                .map(String::as_str)
                .map(parse_pointer_table)
                .collect::<Result<Vec<_>>>()
            {
                Ok(tables) => {
                    group.tables = tables;
                    extract(&rom, &table, &group, &out_dir, width, header)
                }
                Err(e) => Err(e),
            }
        }
        Command::Job { file } => run_job(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", format_error(&e));
            ExitCode::from(1)
        }
    }
}

fn convert(
    address: &str,
    from: AddressSpace,
    header: bool,
    fallback: bool,
    decimal: bool,
    prefix: String,
) -> Result<()> {
    let converter = AddressConverter::new().with_fallback(fallback);
    let space = match from {
        AddressSpace::Linear if header => AddressSpace::Headered,
        other => other,
    };

    let value = AddressValue::resolve(address, space, &converter)?.ok_or_else(|| {
        ToolError::new(
            ErrorCode::InvalidAddressLiteral,
            format!("{} is not a valid address in this space", address),
        )
        .with_hint("try --fallback, or check --from")
    })?;

    let format = AddressFormat {
        prefix,
        decimal,
        header,
        ..AddressFormat::default()
    };
    println!("{}", format.report(value, &converter));
    Ok(())
}

fn decode(
    table: &Path,
    file: &Path,
    width: usize,
    offset: &str,
    length: Option<&str>,
) -> Result<()> {
    let symbols = SymbolTable::from_file(table)?;
    let codec = TextCodec::new(&symbols, width)?;
    let data = std::fs::read(file).map_err(|e| ToolError::io(file, e))?;

    let start = parse_hex_address(offset)? as usize;
    let end = match length {
        Some(length) => start.saturating_add(parse_hex_address(length)? as usize),
        None => BlockBoundaryDetector::new(&symbols)
            .find_end(&data, start)
            .end(),
    };

    let slice = data.get(start..end.min(data.len())).ok_or_else(|| {
        ToolError::new(
            ErrorCode::OffsetOutOfRange,
            format!("offset ${:06X} is past the end of {}", start, file.display()),
        )
        .with_hint(format!("the file is {} bytes long", data.len()))
    })?;
    println!("{}", codec.decode(slice));
    Ok(())
}

fn encode(table: &Path, text: &str, output: Option<&Path>) -> Result<()> {
    let symbols = SymbolTable::from_file(table)?;
    let codec = TextCodec::new(&symbols, symbols.widest_code())?;
    let bytes = codec.encode(text)?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes).map_err(|e| ToolError::io(path, e))?;
            info!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{:02X}", b)).collect();
            println!("{}", hex.join(" "));
        }
    }
    Ok(())
}

fn parse_pointer_table(arg: &str) -> Result<JobTable> {
    let (start, length) = arg.split_once(':').ok_or_else(|| {
        ToolError::new(
            ErrorCode::InvalidAddressLiteral,
            format!("'{}' is not START:LENGTH", arg),
        )
        .with_hint("for example 0x1B0000:0x200")
    })?;
    let table = JobTable {
        start: AddressLiteral::Text(start.to_string()),
        length: AddressLiteral::Text(length.to_string()),
    };
    table.resolve()?;
    Ok(table)
}

fn extract(
    rom: &Path,
    table: &Path,
    group: &JobGroup,
    out_dir: &Path,
    width: usize,
    header: bool,
) -> Result<()> {
    let image = load_image(rom, header)?;
    let symbols = SymbolTable::from_file(table)?;
    let converter = AddressConverter::new().with_cache(DEFAULT_CACHE_CAPACITY);
    let extraction = group.extract(&image, &symbols, &converter, width)?;

    if group.output {
        let paths = OutputPaths::new(out_dir, &group.name);
        let files = write_extraction(&extraction, &paths, group.id_style, true)?;
        println!(
            "{}: {} pointer(s), {} block(s), {} file(s) in {}",
            group.name,
            extraction.pointers().len(),
            extraction.blocks().len(),
            files,
            paths.blocks.display()
        );
    } else {
        println!("{}", render_script(&extraction, group.id_style));
    }
    Ok(())
}

fn run_job(file: &Path) -> Result<()> {
    let job = Job::load(file)?;
    let base = file.parent().unwrap_or_else(|| Path::new("."));

    for outcome in job.run(base)? {
        println!(
            "{}: {} pointer(s), {} block(s), {} file(s)",
            outcome.name,
            outcome.extraction.pointers().len(),
            outcome.extraction.blocks().len(),
            outcome.files
        );
    }
    Ok(())
}

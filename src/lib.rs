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

//! SFCScript Library
//!
//! Tools for pulling text out of Super Famicom / SNES cartridge images and
//! putting it back: address conversion between the cartridge mapping
//! schemes and linear image offsets, character tables, a greedy text
//! codec, and pointer table extraction.
//!
//! # Modules
//!
//! - [`address`] - Mapping schemes, conversion and address rendering
//! - [`table`] - Character table loading and lookup
//! - [`codec`] - Decoding, encoding and block boundary detection
//! - [`extract`] - Pointer table walking and block collection
//! - [`output`] - Script, report and block file writing
//! - [`job`] - Job files describing whole extractions
//! - [`error`] - Error types and error reporting
//!
//! # Example
//!
//! ```no_run
//! use sfcscript::{extract, output, table::SymbolTable, PointerTable};
//! use std::path::Path;
//!
//! fn dump(rom: &Path, tbl: &Path) -> sfcscript::Result<()> {
//!     let image = extract::load_image(rom, true)?;
//!     let symbols = SymbolTable::from_file(tbl)?;
//!
//!     let extraction =
//!         sfcscript::extract_script(&image, &symbols, &[PointerTable::new(0x1B_0000, 0x200)])?;
//!
//!     print!(
//!         "{}",
//!         output::render_script(&extraction, extract::IdentifierStyle::Combined)
//!     );
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod codec;
pub mod error;
pub mod extract;
pub mod job;
pub mod output;
pub mod table;

// Re-export commonly used types
pub use address::{AddressConverter, AddressFormat, AddressValue, Scheme};
pub use codec::{BlockBoundaryDetector, TextCodec};
pub use error::{format_error, ErrorCode, Result, ToolError};
pub use extract::{ExtractOptions, Extraction, PointerTable, PointerTableExtractor};
pub use table::SymbolTable;

/// The version of SFCScript.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "SFCScript";

/// Extract the text behind `tables` with default settings.
///
/// Pointers are two bytes wide, LoROM1 with LoROM2 fallback, with the bank
/// taken from where each table sits. Blocks shared between tables are
/// decoded once.
pub fn extract_script(
    image: &[u8],
    symbols: &SymbolTable,
    tables: &[PointerTable],
) -> Result<Extraction> {
    let converter = AddressConverter::new();
    PointerTableExtractor::new(symbols, &converter, ExtractOptions::default())?
        .extract_all(image, tables)
}

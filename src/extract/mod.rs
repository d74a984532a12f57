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

//! Pointer table extraction.
//!
//! A pointer table is a run of little-endian pointers, two or three bytes
//! each. Two-byte pointers borrow their bank from the bank the table itself
//! sits in. Every pointer is resolved to a linear offset, the block behind
//! it is scanned up to its terminator and decoded, and blocks referenced
//! more than once are kept once.
//!
//! This module contains:
//! - `block`: Pointer entries, text blocks and the accumulated result
//! - `identifier`: Labels for blocks in script output

pub mod block;
pub mod identifier;

pub use block::{Extraction, PointerEntry, PointerTable, TextBlock};
pub use identifier::IdentifierStyle;

use std::path::Path;

use log::{debug, info, trace, warn};

use crate::address::{AddressConverter, BytePointer, Scheme, COPIER_HEADER_SIZE};
use crate::codec::{BlockBoundaryDetector, TextCodec, DEFAULT_MAX_WIDTH};
use crate::error::{ErrorCode, Result, ToolError};
use crate::table::SymbolTable;

/// Pointer widths the extractor understands.
pub const POINTER_WIDTHS: [usize; 2] = [2, 3];

/// Settings for one pass over a pointer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Scheme pointers are written in.
    pub scheme: Scheme,
    /// Bytes per pointer, 2 or 3.
    pub pointer_width: usize,
    /// Bank for every pointer, overriding the table's or the slot's.
    pub bank: Option<u8>,
    /// Byte that ends a block.
    pub terminator: u8,
    /// Widest code tried while decoding.
    pub max_width: usize,
    /// Resolve LoROM pointers the scheme rejects through the other LoROM
    /// variant. Tables in the LoROM1 upper mirror take a bank of $F0 and
    /// up, which only LoROM2 accepts.
    pub fallback: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            scheme: Scheme::LoRom1,
            pointer_width: 2,
            bank: None,
            terminator: 0x00,
            max_width: DEFAULT_MAX_WIDTH,
            fallback: true,
        }
    }
}

/// Counters for one pointer table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSummary {
    /// Slots read.
    pub slots: usize,
    /// Blocks not seen in earlier slots or tables.
    pub new_blocks: usize,
    /// Slots whose pointer did not resolve.
    pub unresolved: usize,
}

/// Where the bank byte of each pointer comes from.
#[derive(Debug, Clone, Copy)]
enum BankSource {
    Fixed(u8),
    Slot,
}

/// Walks pointer tables and collects the blocks they reference.
#[derive(Debug, Clone, Copy)]
pub struct PointerTableExtractor<'a> {
    codec: TextCodec<'a>,
    detector: BlockBoundaryDetector<'a>,
    converter: &'a AddressConverter,
    options: ExtractOptions,
}

impl<'a> PointerTableExtractor<'a> {
    /// Create an extractor over `table`.
    pub fn new(
        table: &'a SymbolTable,
        converter: &'a AddressConverter,
        options: ExtractOptions,
    ) -> Result<Self> {
        if !POINTER_WIDTHS.contains(&options.pointer_width) {
            return Err(ToolError::new(
                ErrorCode::InvalidPointerWidth,
                format!("pointer width {} is not supported", options.pointer_width),
            )
            .with_hint("use 2 for bank-relative pointers or 3 for long pointers"));
        }

        Ok(Self {
            codec: TextCodec::new(table, options.max_width)?,
            detector: BlockBoundaryDetector::new(table).with_terminator(options.terminator),
            converter,
            options,
        })
    }

    /// The options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract one table into a fresh result.
    pub fn extract(&self, data: &[u8], table: PointerTable) -> Result<Extraction> {
        let mut extraction = Extraction::new();
        self.extract_into(data, table, &mut extraction)?;
        Ok(extraction)
    }

    /// Extract several tables into one result.
    pub fn extract_all(&self, data: &[u8], tables: &[PointerTable]) -> Result<Extraction> {
        let mut extraction = Extraction::new();
        for &table in tables {
            self.extract_into(data, table, &mut extraction)?;
        }
        Ok(extraction)
    }

    /// Extract one table, adding to `extraction`.
    ///
    /// Blocks already present from earlier tables are not decoded again;
    /// the slot is recorded as a duplicate.
    pub fn extract_into(
        &self,
        data: &[u8],
        table: PointerTable,
        extraction: &mut Extraction,
    ) -> Result<TableSummary> {
        let start = table.start as usize;
        let end = start.checked_add(table.length as usize);
        let slots = match end {
            Some(end) if end <= data.len() => &data[start..end],
            _ => {
                return Err(ToolError::new(
                    ErrorCode::PointerTableOutOfRange,
                    format!(
                        "pointer table ${:06X}+{} runs past the end of the image ({} bytes)",
                        table.start,
                        table.length,
                        data.len()
                    ),
                ))
            }
        };

        let width = self.options.pointer_width;
        if slots.len() % width != 0 {
            warn!(
                "pointer table ${:06X}: ignoring {} trailing byte(s)",
                table.start,
                slots.len() % width
            );
        }

        let bank = self.bank_source(table)?;
        let table_index = extraction.begin_table();
        let mut summary = TableSummary::default();
        debug!(
            "pointer table ${:06X}: {} slot(s) of {} bytes, {:?}",
            table.start,
            slots.len() / width,
            width,
            bank
        );

        for (slot_index, raw) in slots.chunks_exact(width).enumerate() {
            let slot_address = table.start + (slot_index * width) as u32;
            let pointer = BytePointer {
                low: raw[0],
                high: raw[1],
                bank: match bank {
                    BankSource::Fixed(bank) => bank,
                    BankSource::Slot => raw[2],
                },
            }
            .address();
            summary.slots += 1;

            let mut entry = PointerEntry {
                table_address: table.start,
                table_index,
                slot_index,
                slot_address,
                pointer,
                target: None,
                scheme_address: None,
                length: 0,
                duplicate: false,
            };

            let Some(target) = self
                .resolve(pointer)
                .filter(|&target| (target as usize) < data.len())
            else {
                warn!(
                    "pointer ${:06X} at ${:06X} does not resolve inside the image",
                    pointer, slot_address
                );
                summary.unresolved += 1;
                extraction.push_pointer(entry);
                continue;
            };

            entry.target = Some(target);
            entry.scheme_address = self.converter.from_linear(target, self.options.scheme);

            if let Some(block) = extraction.block_at(target) {
                entry.length = block.len();
                entry.duplicate = true;
            } else {
                let block = self.read_block(data, target, &entry);
                entry.length = block.len();
                extraction.push_block(block);
                summary.new_blocks += 1;
            }

            trace!(
                "slot {} (${:06X}): ${:06X} -> ${:06X}, {} bytes{}",
                slot_index,
                slot_address,
                pointer,
                target,
                entry.length,
                if entry.duplicate { ", seen" } else { "" }
            );
            extraction.push_pointer(entry);
        }

        Ok(summary)
    }

    fn resolve(&self, pointer: u32) -> Option<u32> {
        let scheme = self.options.scheme;
        self.converter.to_linear(pointer, scheme).or_else(|| {
            let other = scheme.fallback().filter(|_| self.options.fallback)?;
            trace!("${:06X} rejected by {}, retrying as {}", pointer, scheme, other);
            self.converter.to_linear(pointer, other)
        })
    }

    fn bank_source(&self, table: PointerTable) -> Result<BankSource> {
        if let Some(bank) = self.options.bank {
            return Ok(BankSource::Fixed(bank));
        }
        if self.options.pointer_width == 3 {
            return Ok(BankSource::Slot);
        }

        match self.converter.from_linear(table.start, self.options.scheme) {
            Some(address) => Ok(BankSource::Fixed(BytePointer::from_address(address).bank)),
            None => Err(ToolError::new(
                ErrorCode::PointerTableOutOfRange,
                format!(
                    "pointer table ${:06X} has no {} address to take a bank from",
                    table.start,
                    self.options.scheme.label()
                ),
            )
            .with_hint("pass the bank explicitly")),
        }
    }

    fn read_block(&self, data: &[u8], start: u32, entry: &PointerEntry) -> TextBlock {
        let end = self.detector.find_end(data, start as usize);
        let bytes = data[start as usize..end.end()].to_vec();

        TextBlock {
            start,
            text: self.codec.decode(&bytes),
            bytes,
            truncated: end.is_truncated(),
            table_address: entry.table_address,
            slot_index: entry.slot_index,
            slot_address: entry.slot_address,
        }
    }
}

/// Drop a copier header from the front of an image.
pub fn strip_copier_header(data: &[u8]) -> &[u8] {
    data.get(COPIER_HEADER_SIZE as usize..).unwrap_or_default()
}

/// Read an image from disk, optionally dropping a copier header.
pub fn load_image(path: &Path, header: bool) -> Result<Vec<u8>> {
    let data = std::fs::read(path).map_err(|e| ToolError::io(path, e))?;
    let data = if header {
        strip_copier_header(&data).to_vec()
    } else {
        data
    };
    info!("loaded {} ({} bytes)", path.display(), data.len());
    Ok(data)
}

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

//! Finding where a terminated text block ends.
//!
//! Blocks end at a zero byte, but tables may define multi-byte codes whose
//! last byte is zero (a control code followed by a parameter of `$00`).
//! A zero byte only terminates the block if no window of 4, 3 or 2 bytes
//! ending at it is a defined code.
//!
//! Only a zero that ends a code is recognized. A zero in the middle of a
//! code, or at the end of one wider than four bytes, is taken as a
//! terminator.

use log::warn;

use crate::table::SymbolTable;

/// Window widths probed backwards from a candidate terminator.
pub const PROBE_WIDTHS: [usize; 3] = [4, 3, 2];

/// Bytes dropped from the end of the image when a scan runs off it.
pub const TRUNCATION_MARGIN: usize = 2;

/// Where a block ends (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    /// A genuine terminator was found at this index.
    Terminated(usize),
    /// The scan ran off the data; the block was cut short here.
    Truncated(usize),
}

impl BlockEnd {
    /// The exclusive end index.
    pub fn end(&self) -> usize {
        match *self {
            BlockEnd::Terminated(end) | BlockEnd::Truncated(end) => end,
        }
    }

    /// Whether the scan ran off the data.
    pub fn is_truncated(&self) -> bool {
        matches!(self, BlockEnd::Truncated(_))
    }
}

/// Terminator scanner over one [`SymbolTable`].
#[derive(Debug, Clone, Copy)]
pub struct BlockBoundaryDetector<'t> {
    table: &'t SymbolTable,
    terminator: u8,
}

impl<'t> BlockBoundaryDetector<'t> {
    /// Create a detector for zero-terminated blocks.
    pub fn new(table: &'t SymbolTable) -> Self {
        Self {
            table,
            terminator: 0x00,
        }
    }

    /// Use a different terminator byte.
    pub fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    /// The terminator byte.
    pub fn terminator(&self) -> u8 {
        self.terminator
    }

    /// Find the end of the block starting at `block_start`.
    pub fn find_end(&self, data: &[u8], block_start: usize) -> BlockEnd {
        self.scan(data, block_start, block_start)
    }

    /// Find the end of the block starting at `block_start`, looking for
    /// terminators from `scan_from` on.
    pub fn scan(&self, data: &[u8], block_start: usize, scan_from: usize) -> BlockEnd {
        for index in scan_from.max(block_start)..data.len() {
            if self.is_terminator(data, block_start, index) {
                return BlockEnd::Terminated(index);
            }
        }

        let end = data.len().saturating_sub(TRUNCATION_MARGIN).max(block_start);
        warn!(
            "block at ${:06X} has no terminator before end of data, truncated to {} bytes",
            block_start,
            end - block_start
        );
        BlockEnd::Truncated(end)
    }

    /// Check whether `data[index]` ends the block starting at `block_start`.
    pub fn is_terminator(&self, data: &[u8], block_start: usize, index: usize) -> bool {
        data.get(index) == Some(&self.terminator) && !self.inside_code(data, block_start, index)
    }

    /// Whether a defined multi-byte code ends at `index`.
    fn inside_code(&self, data: &[u8], block_start: usize, index: usize) -> bool {
        PROBE_WIDTHS.iter().any(|&width| {
            let Some(first) = (index + 1).checked_sub(width) else {
                return false;
            };
            first >= block_start && self.table.probe(&data[first..=index]).symbol().is_some()
        })
    }
}

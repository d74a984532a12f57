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

//! Extraction results.

use std::collections::HashMap;

/// A pointer table in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTable {
    /// Linear offset of the first slot.
    pub start: u32,
    /// Size of the table in bytes.
    pub length: u32,
}

impl PointerTable {
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }
}

/// One slot of a pointer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEntry {
    /// Linear offset of the table the slot belongs to.
    pub table_address: u32,
    /// Ordinal of that table within the extraction.
    pub table_index: usize,
    /// Zero-based slot index within the table.
    pub slot_index: usize,
    /// Linear offset of the slot itself.
    pub slot_address: u32,
    /// The cartridge address composed from the slot.
    pub pointer: u32,
    /// Linear offset the pointer resolves to.
    pub target: Option<u32>,
    /// Canonical cartridge address of the target.
    pub scheme_address: Option<u32>,
    /// Length of the referenced block in bytes.
    pub length: usize,
    /// Whether an earlier slot already referenced the same block.
    pub duplicate: bool,
}

/// A distinct text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// Linear offset of the first byte.
    pub start: u32,
    /// Raw bytes, terminator excluded.
    pub bytes: Vec<u8>,
    /// Decoded text.
    pub text: String,
    /// Whether the scan ran off the image.
    pub truncated: bool,
    /// Table of the first slot that referenced the block.
    pub table_address: u32,
    /// Index of that slot.
    pub slot_index: usize,
    /// Linear offset of that slot.
    pub slot_address: u32,
}

impl TextBlock {
    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the block has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Blocks of zero or one byte are not written out on their own.
    pub fn is_emittable(&self) -> bool {
        self.bytes.len() > 1
    }
}

/// Pointer entries and distinct blocks accumulated over one or more
/// pointer tables.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pointers: Vec<PointerEntry>,
    blocks: Vec<TextBlock>,
    by_start: HashMap<u32, usize>,
    tables: usize,
}

impl Extraction {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per slot, in extraction order.
    pub fn pointers(&self) -> &[PointerEntry] {
        &self.pointers
    }

    /// One block per distinct start offset, in first-reference order.
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// Blocks worth writing out on their own.
    pub fn emittable_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter(|block| block.is_emittable())
    }

    /// The block starting at `start`, if any slot referenced it.
    pub fn block_at(&self, start: u32) -> Option<&TextBlock> {
        self.by_start.get(&start).map(|&index| &self.blocks[index])
    }

    /// Number of pointer tables walked so far.
    pub fn table_count(&self) -> usize {
        self.tables
    }

    /// Check if nothing has been extracted yet.
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Reserve the next table ordinal.
    pub(crate) fn begin_table(&mut self) -> usize {
        self.tables += 1;
        self.tables - 1
    }

    pub(crate) fn push_pointer(&mut self, entry: PointerEntry) {
        self.pointers.push(entry);
    }

    /// Add a block unless one with the same start exists.
    ///
    /// Returns `false` for a duplicate.
    pub(crate) fn push_block(&mut self, block: TextBlock) -> bool {
        if self.by_start.contains_key(&block.start) {
            return false;
        }
        self.by_start.insert(block.start, self.blocks.len());
        self.blocks.push(block);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(start: u32, bytes: &[u8]) -> TextBlock {
        TextBlock {
            start,
            bytes: bytes.to_vec(),
            text: String::new(),
            truncated: false,
            table_address: 0,
            slot_index: 0,
            slot_address: 0,
        }
    }

    #[test]
    fn test_push_block_deduplicates() {
        let mut extraction = Extraction::new();
        assert!(extraction.push_block(block(0x10, &[1, 2])));
        assert!(!extraction.push_block(block(0x10, &[3, 4, 5])));
        assert!(extraction.push_block(block(0x20, &[6])));

        assert_eq!(extraction.blocks().len(), 2);
        assert_eq!(extraction.block_at(0x10).unwrap().bytes, vec![1, 2]);
        assert!(extraction.block_at(0x30).is_none());
    }

    #[test]
    fn test_emittable_blocks_skip_short_ones() {
        let mut extraction = Extraction::new();
        extraction.push_block(block(0x10, &[]));
        extraction.push_block(block(0x20, &[1]));
        extraction.push_block(block(0x30, &[1, 2]));

        let starts: Vec<u32> = extraction.emittable_blocks().map(|b| b.start).collect();
        assert_eq!(starts, vec![0x30]);
    }

    #[test]
    fn test_table_ordinals() {
        let mut extraction = Extraction::new();
        assert_eq!(extraction.begin_table(), 0);
        assert_eq!(extraction.begin_table(), 1);
        assert_eq!(extraction.table_count(), 2);
    }
}

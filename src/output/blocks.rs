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

//! Raw block dumps.
//!
//! Each block longer than one byte is written to `<start>.bin`, where
//! `<start>` is its decimal linear offset.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::extract::{Extraction, TextBlock};

/// File name for `block`.
pub fn block_file_name(block: &TextBlock) -> String {
    format!("{}.bin", block.start)
}

/// Write every emittable block into `dir`.
///
/// Returns the written paths.
pub fn write_blocks(extraction: &Extraction, dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for block in extraction.emittable_blocks() {
        let path = dir.join(block_file_name(block));
        fs::write(&path, &block.bytes)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressConverter;
    use crate::extract::{ExtractOptions, PointerTable, PointerTableExtractor};
    use crate::table::SymbolTable;
    use tempfile::TempDir;

    #[test]
    fn test_writes_only_long_blocks() {
        let table = SymbolTable::parse("41=A\n");
        let converter = AddressConverter::new();
        let extractor =
            PointerTableExtractor::new(&table, &converter, ExtractOptions::default()).unwrap();

        let mut data = vec![0xEE; 0x20];
        data[0x00..0x04].copy_from_slice(&[0x10, 0x80, 0x18, 0x80]);
        data[0x10..0x13].copy_from_slice(&[0x41, 0x41, 0x00]);
        data[0x18..0x1A].copy_from_slice(&[0x41, 0x00]);
        let extraction = extractor.extract(&data, PointerTable::new(0, 4)).unwrap();

        let dir = TempDir::new().unwrap();
        let written = write_blocks(&extraction, dir.path()).unwrap();

        assert_eq!(written, vec![dir.path().join("16.bin")]);
        assert_eq!(fs::read(&written[0]).unwrap(), vec![0x41, 0x41]);
        assert!(!dir.path().join("24.bin").exists());
    }
}

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

//! Fuzz target for block boundary scanning.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_boundary

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sfcscript::codec::BlockEnd;
use sfcscript::{BlockBoundaryDetector, SymbolTable};

#[derive(Debug, Arbitrary)]
struct Input {
    table: String,
    start: u16,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let table = SymbolTable::parse(&input.table);
    let detector = BlockBoundaryDetector::new(&table);
    let start = usize::from(input.start);

    match detector.find_end(&input.data, start) {
        BlockEnd::Terminated(end) => {
            assert!(end >= start);
            assert_eq!(input.data[end], 0x00);
        }
        BlockEnd::Truncated(end) => assert!(end >= start),
    }
});

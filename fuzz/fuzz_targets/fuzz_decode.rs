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

//! Fuzz target for decoding and re-encoding.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_decode

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sfcscript::{SymbolTable, TextCodec};

#[derive(Debug, Arbitrary)]
struct Input {
    table: String,
    width: u8,
    bytes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let table = SymbolTable::parse(&input.table);
    let Ok(codec) = TextCodec::new(&table, usize::from(input.width % 5)) else {
        return;
    };

    let units = codec.decode_units(&input.bytes);
    assert_eq!(units.iter().map(|u| u.width).sum::<usize>(), input.bytes.len());

    // Encoding may fail on ambiguous tables, but must not panic.
    let _ = codec.encode(&codec.decode(&input.bytes));
});

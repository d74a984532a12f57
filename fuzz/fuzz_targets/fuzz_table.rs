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

//! Fuzz target for table loading.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_table

#![no_main]

use libfuzzer_sys::fuzz_target;
use sfcscript::SymbolTable;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    let table = SymbolTable::parse(&source);

    // Every defined code must map back through its own symbol.
    for line in source.lines() {
        if let Some((_, symbol)) = line.split_once('=') {
            if let Some(code) = table.lookup_code(symbol) {
                assert!(table.symbol(code).is_some());
            }
        }
    }
});

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

//! Property-based tests.
//!
//! These tests check invariants that should hold for all inputs, using
//! proptest for random input generation.

use proptest::prelude::*;
use sfcscript::codec::BlockEnd;
use sfcscript::table::wildcard;
use sfcscript::{AddressConverter, BlockBoundaryDetector, Scheme, SymbolTable, TextCodec};

fn scheme() -> impl Strategy<Value = Scheme> {
    prop::sample::select(Scheme::ALL.to_vec())
}

fn sparse_table() -> SymbolTable {
    SymbolTable::parse("41=A\n42=B\nFF00=<end>\nF0**=<w **>\nE1E2E3=<3>\n")
}

// ============================================================================
// Address conversion
// ============================================================================

proptest! {
    /// Property: every offset in a scheme's round-trip domain survives
    /// linear -> cartridge -> linear.
    #[test]
    fn prop_round_trip(scheme in scheme(), seed in any::<u32>()) {
        let domain = scheme.round_trip_domain();
        let offset = domain.start + seed % (domain.end - domain.start);
        let converter = AddressConverter::new();

        let address = converter.from_linear(offset, scheme);
        prop_assert!(address.is_some(), "{} cannot express ${:06X}", scheme, offset);
        prop_assert_eq!(address.and_then(|a| converter.to_linear(a, scheme)), Some(offset));
    }

    /// Property: conversions never produce values wider than 24 bits.
    #[test]
    fn prop_addresses_fit_24_bits(scheme in scheme(), value in 0u32..0x100_0000) {
        let converter = AddressConverter::new();
        if let Some(address) = converter.from_linear(value, scheme) {
            prop_assert!(address <= 0xFF_FFFF);
        }
        if let Some(offset) = converter.to_linear(value, scheme) {
            prop_assert!(offset < 0x80_0000);
        }
    }

    /// Property: with fallback, LoROM1 resolves the upper mirror the way
    /// LoROM2 does.
    #[test]
    fn prop_fallback_matches_other_variant(bank in 0x80u32..=0xFF, low in 0x8000u32..=0xFFFF) {
        let address = (bank << 16) | low;
        let converter = AddressConverter::new().with_fallback(true);
        prop_assert_eq!(
            converter.to_linear(address, Scheme::LoRom1),
            Scheme::LoRom2.to_linear(address)
        );
        prop_assert_eq!(Scheme::LoRom1.to_linear(address), None);
    }

    /// Property: a cache never changes a result.
    #[test]
    fn prop_cache_is_transparent(scheme in scheme(), value in 0u32..0x100_0000) {
        let plain = AddressConverter::new();
        let cached = AddressConverter::new().with_cache(4);
        for _ in 0..2 {
            prop_assert_eq!(cached.to_linear(value, scheme), plain.to_linear(value, scheme));
            prop_assert_eq!(cached.from_linear(value, scheme), plain.from_linear(value, scheme));
        }
    }
}

// ============================================================================
// Codec
// ============================================================================

proptest! {
    /// Property: decoded units cover every input byte exactly once.
    #[test]
    fn prop_units_cover_input(
        bytes in prop::collection::vec(any::<u8>(), 0..256),
        width in 1usize..=4,
    ) {
        let table = sparse_table();
        let codec = TextCodec::new(&table, width).unwrap();
        let mut next = 0;
        for unit in codec.decode_units(&bytes) {
            prop_assert_eq!(unit.offset, next);
            prop_assert!(unit.width >= 1 && unit.width <= width);
            next += unit.width;
        }
        prop_assert_eq!(next, bytes.len());
    }

    /// Property: decoding is deterministic.
    #[test]
    fn prop_decode_deterministic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let table = sparse_table();
        let codec = TextCodec::new(&table, 3).unwrap();
        prop_assert_eq!(codec.decode(&bytes), codec.decode(&bytes));
    }

    /// Property: with only single-byte codes, decoded text encodes back to
    /// the same bytes, placeholders included.
    #[test]
    fn prop_single_byte_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let table = SymbolTable::parse("41=A\n42=B\n20= \n");
        let codec = TextCodec::new(&table, 1).unwrap();
        let text = codec.decode(&bytes);
        prop_assert_eq!(codec.encode(&text).unwrap(), bytes);
    }

    /// Property: a scan ends inside the data, never before the block, and
    /// only on a terminator byte.
    #[test]
    fn prop_boundary_in_range(
        bytes in prop::collection::vec(prop::sample::select(vec![0x00u8, 0x41, 0xFF, 0xF0, 0xE3]), 0..64),
        start_seed in any::<usize>(),
    ) {
        let table = sparse_table();
        let detector = BlockBoundaryDetector::new(&table);
        let start = if bytes.is_empty() { 0 } else { start_seed % bytes.len() };

        match detector.find_end(&bytes, start) {
            BlockEnd::Terminated(end) => {
                prop_assert!(end >= start && end < bytes.len());
                prop_assert_eq!(bytes[end], 0x00);
            }
            BlockEnd::Truncated(end) => {
                prop_assert!(end >= start);
                prop_assert!(end <= bytes.len().max(start));
            }
        }
    }
}

// ============================================================================
// Wildcards
// ============================================================================

#[test]
fn test_nested_wildcard_cardinality() {
    let expansion = wildcard::expand("E0**%%", "<** %%>");
    assert_eq!(expansion.len(), 65_536);

    let table = SymbolTable::parse("E0**%%=<** %%>\n");
    assert_eq!(table.len(), 65_536);
    assert_eq!(table.symbol(0xE0_12AB), Some("<12 AB>"));
}

#[test]
fn test_inner_wildcard_alone_is_literal() {
    let table = SymbolTable::parse("E0%%=x\n");
    assert_eq!(table.len(), 0);
    assert_eq!(table.stats().errors, 1);
}

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

//! Address conversion between linear image offsets and cartridge
//! address spaces.
//!
//! This module provides:
//! - [`Scheme`] - the five mapping schemes and their arithmetic
//! - [`AddressConverter`] - fallback-aware, memoizing conversions
//! - [`AddressValue`] - a linear offset with per-scheme byte accessors
//! - [`AddressFormat`] - rendering and multi-scheme reports

mod cache;
mod converter;
mod display;
mod scheme;
mod value;

pub use cache::{ConversionCache, Direction};
pub use converter::{AddressConverter, DEFAULT_CACHE_CAPACITY};
pub use display::AddressFormat;
pub use scheme::{Scheme, FAST_ROM_BIAS, HALF_IMAGE, HIROM_BASE, LOROM1_MIRROR_START};
pub use value::{
    parse_hex_address, AddressInput, AddressSpace, AddressValue, BytePointer,
    COPIER_HEADER_SIZE,
};

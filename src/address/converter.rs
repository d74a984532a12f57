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

//! Address converter with optional LoROM fallback and memoization.

use log::trace;

use super::cache::{ConversionCache, Direction};
use super::scheme::Scheme;

/// Default number of memoized conversions.
pub const DEFAULT_CACHE_CAPACITY: usize = 0x1_0000;

/// Converts between linear offsets and cartridge addresses.
///
/// Results are identical with or without a cache; the cache only avoids
/// recomputation when the same pointer is resolved repeatedly.
#[derive(Debug, Default)]
pub struct AddressConverter {
    fallback: bool,
    cache: Option<ConversionCache>,
}

impl AddressConverter {
    /// Create a converter without fallback or cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Let each LoROM variant retry with the other one when its own
    /// range check fails.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Memoize up to `capacity` conversion results.
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(ConversionCache::new(capacity));
        self
    }

    /// Whether LoROM fallback is enabled.
    pub fn fallback(&self) -> bool {
        self.fallback
    }

    /// Map a cartridge address of `scheme` to a linear offset.
    pub fn to_linear(&self, address: u32, scheme: Scheme) -> Option<u32> {
        self.memo(scheme, Direction::ToLinear, address, || {
            scheme.to_linear(address).or_else(|| {
                if !self.fallback {
                    return None;
                }
                let other = scheme.fallback()?;
                trace!(
                    "${:06X} rejected by {}, retrying as {}",
                    address,
                    scheme,
                    other
                );
                other.to_linear(address)
            })
        })
    }

    /// Map a linear offset to a cartridge address of `scheme`.
    pub fn from_linear(&self, offset: u32, scheme: Scheme) -> Option<u32> {
        self.memo(scheme, Direction::FromLinear, offset, || {
            scheme.from_linear(offset)
        })
    }

    fn memo(
        &self,
        scheme: Scheme,
        direction: Direction,
        input: u32,
        compute: impl FnOnce() -> Option<u32>,
    ) -> Option<u32> {
        match &self.cache {
            Some(cache) => cache.get_or_insert_with(scheme, direction, input, compute),
            None => compute(),
        }
    }
}

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

//! Bounded memo table for address conversions.

use std::cell::RefCell;
use std::collections::HashMap;

use super::scheme::Scheme;

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Cartridge address to linear offset.
    ToLinear,
    /// Linear offset to cartridge address.
    FromLinear,
}

type CacheKey = (Scheme, Direction, u32);

/// A bounded map of conversion results keyed by input value.
///
/// When the map is full it is cleared before the next insert.
#[derive(Debug)]
pub struct ConversionCache {
    capacity: usize,
    entries: RefCell<HashMap<CacheKey, Option<u32>>>,
}

impl ConversionCache {
    /// Create a cache holding at most `capacity` results.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Return the cached result or compute and remember it.
    pub fn get_or_insert_with(
        &self,
        scheme: Scheme,
        direction: Direction,
        input: u32,
        compute: impl FnOnce() -> Option<u32>,
    ) -> Option<u32> {
        let key = (scheme, direction, input);
        if let Some(hit) = self.entries.borrow().get(&key) {
            return *hit;
        }

        let value = compute();
        if self.capacity > 0 {
            let mut entries = self.entries.borrow_mut();
            if entries.len() >= self.capacity {
                entries.clear();
            }
            entries.insert(key, value);
        }
        value
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

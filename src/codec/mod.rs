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

//! Table-driven text codec.
//!
//! Decoding is greedy and never backtracks: at each position the widest
//! defined code wins, and a byte that starts no multi-byte code is emitted
//! on its own, as its symbol or as a `[XX]` stand-in.
//!
//! Encoding is the inverse for defined symbols. Stand-ins are encoded at
//! face value, so decoded text round-trips even where the table has gaps.

pub mod boundary;

pub use boundary::{BlockBoundaryDetector, BlockEnd, PROBE_WIDTHS};

use std::borrow::Cow;

use crate::error::{ErrorCode, Result, ToolError};
use crate::table::hex::{self, MAX_CODE_BYTES};
use crate::table::{Probe, SymbolTable};

/// Default widest code tried while decoding.
pub const DEFAULT_MAX_WIDTH: usize = 3;

/// One emitted symbol and the bytes it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedUnit<'t> {
    /// Offset of the first byte.
    pub offset: usize,
    /// Number of bytes consumed.
    pub width: usize,
    /// The emitted text.
    pub text: Cow<'t, str>,
}

/// Decoder and encoder over one [`SymbolTable`].
#[derive(Debug, Clone, Copy)]
pub struct TextCodec<'t> {
    table: &'t SymbolTable,
    max_width: usize,
}

impl<'t> TextCodec<'t> {
    /// Create a codec trying codes of up to `max_width` bytes.
    pub fn new(table: &'t SymbolTable, max_width: usize) -> Result<Self> {
        if !(1..=MAX_CODE_BYTES).contains(&max_width) {
            return Err(ToolError::new(
                ErrorCode::InvalidCodeWidth,
                format!("code width {} is not supported", max_width),
            )
            .with_hint(format!("use a width between 1 and {}", MAX_CODE_BYTES)));
        }
        Ok(Self { table, max_width })
    }

    /// The table this codec reads from.
    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    /// Widest code tried while decoding.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Decode `bytes` into symbols, one unit per consumed code.
    pub fn decode_units(&self, bytes: &[u8]) -> Vec<DecodedUnit<'t>> {
        let mut units = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let widest = self.max_width.min(bytes.len() - pos);
            let multi = (2..=widest).rev().find_map(|width| {
                match self.table.probe(&bytes[pos..pos + width]) {
                    Probe::Mapped(symbol) => Some(DecodedUnit {
                        offset: pos,
                        width,
                        text: Cow::Borrowed(symbol),
                    }),
                    Probe::Unmapped | Probe::Degenerate => None,
                }
            });

            let unit = multi.unwrap_or_else(|| DecodedUnit {
                offset: pos,
                width: 1,
                text: self.table.lookup_symbol(u32::from(bytes[pos])),
            });

            pos += unit.width;
            units.push(unit);
        }

        units
    }

    /// Decode `bytes` into text.
    pub fn decode(&self, bytes: &[u8]) -> String {
        self.decode_units(bytes)
            .iter()
            .map(|unit| unit.text.as_ref())
            .collect()
    }

    /// Encode text back into bytes.
    ///
    /// At each position the longest defined symbol wins; otherwise a
    /// bracketed stand-in such as `[9A]` is taken at face value.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let chars: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let boundary = |i: usize| chars.get(i).copied().unwrap_or(text.len());
        let mut bytes = Vec::new();
        let mut i = 0;

        'scan: while i < chars.len() {
            let start = chars[i];
            let longest = self.table.longest_symbol().min(chars.len() - i);

            for len in (1..=longest).rev() {
                if let Some(code) = self.table.lookup_code(&text[start..boundary(i + len)]) {
                    bytes.extend(hex::split(code));
                    i += len;
                    continue 'scan;
                }
            }

            if let Some(close) = text[start..].find(']') {
                let token = &text[start..start + close + 1];
                if let Some(code) = self.table.lookup_code_inferred(token) {
                    bytes.extend(hex::split(code));
                    i += token.chars().count();
                    continue 'scan;
                }
            }

            let found = text[start..].chars().next().unwrap_or_default();
            return Err(ToolError::new(
                ErrorCode::UnencodableText,
                format!("no table entry for {:?} at character {}", found, i),
            ));
        }

        Ok(bytes)
    }
}

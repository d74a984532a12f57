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

//! Character tables.
//!
//! A table file maps hexadecimal codes of one to four bytes onto text:
//!
//! ```text
//! 00=A
//! 01=B
//! FF00=<END>
//! FE=\n
//! E0**=<item **>
//! ```
//!
//! The first definition of a code wins, and so does the first definition
//! of a symbol. Lines that are not `code=literal` are counted and skipped.

pub mod hex;
pub mod wildcard;

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Result, ToolError};

/// Escape token in a literal that stands for a line break.
pub const NEWLINE_ESCAPE: &str = "\\n";

/// Counters collected while loading a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Source lines read.
    pub lines: usize,
    /// Definitions produced, including ones ignored as duplicates.
    pub definitions: usize,
    /// Lines skipped because they were malformed.
    pub errors: usize,
}

/// Result of looking up a window of bytes as one multi-byte code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<'a> {
    /// The window is a defined code.
    Mapped(&'a str),
    /// The window is not a defined code.
    Unmapped,
    /// The window starts with a zero byte, so its value is the value of a
    /// narrower window and says nothing about this width.
    Degenerate,
}

impl<'a> Probe<'a> {
    /// The symbol, if the window is a defined code.
    pub fn symbol(&self) -> Option<&'a str> {
        match *self {
            Probe::Mapped(symbol) => Some(symbol),
            Probe::Unmapped | Probe::Degenerate => None,
        }
    }
}

/// A bidirectional code/symbol map.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<u32, String>,
    codes: HashMap<String, u32>,
    longest_symbol: usize,
    stats: LoadStats,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load definitions from a sequence of lines.
    pub fn load<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();

        for (index, line) in lines.into_iter().enumerate() {
            table.stats.lines += 1;
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            if let Err(reason) = table.load_line(line) {
                table.stats.errors += 1;
                warn!("table line {}: {}", index + 1, reason);
            }
        }

        debug!(
            "loaded table: {} lines, {} definitions, {} codes, {} errors",
            table.stats.lines,
            table.stats.definitions,
            table.symbols.len(),
            table.stats.errors
        );

        table
    }

    /// Load definitions from a string.
    pub fn parse(source: &str) -> Self {
        Self::load(source.lines())
    }

    /// Load a UTF-8 table file. Invalid sequences are replaced.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ToolError::io(path, e))?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    fn load_line(&mut self, line: &str) -> std::result::Result<(), String> {
        let fields: Vec<&str> = line.split('=').collect();
        if fields.len() != 2 {
            return Err(format!("expected 'code=literal', got {:?}", line));
        }

        let literal = fields[1]
            .replace(['\r', '\n'], "")
            .replace(NEWLINE_ESCAPE, "\n");

        for (code, symbol) in wildcard::expand(fields[0].trim(), &literal) {
            let value = parse_code(&code)?;
            self.stats.definitions += 1;
            self.insert(value, symbol);
        }
        Ok(())
    }

    /// Add a definition unless the code or the symbol is already taken.
    pub fn insert(&mut self, code: u32, symbol: String) {
        if !self.codes.contains_key(&symbol) {
            self.longest_symbol = self.longest_symbol.max(symbol.chars().count());
            self.codes.insert(symbol.clone(), code);
        }
        self.symbols.entry(code).or_insert(symbol);
    }

    /// The defined symbol for `code`.
    pub fn symbol(&self, code: u32) -> Option<&str> {
        self.symbols.get(&code).map(String::as_str)
    }

    /// The symbol for `code`, or a bracketed hex stand-in such as `[9A]`.
    pub fn lookup_symbol(&self, code: u32) -> Cow<'_, str> {
        match self.symbol(code) {
            Some(symbol) => Cow::Borrowed(symbol),
            None => Cow::Owned(hex::placeholder(code)),
        }
    }

    /// The code for `symbol`.
    ///
    /// A bracketed stand-in resolves only if its code is defined.
    pub fn lookup_code(&self, symbol: &str) -> Option<u32> {
        if let Some(code) = self.codes.get(symbol) {
            return Some(*code);
        }
        hex::parse_placeholder(symbol).filter(|code| self.symbols.contains_key(code))
    }

    /// The code for `symbol`, taking any bracketed stand-in at face value.
    pub fn lookup_code_inferred(&self, symbol: &str) -> Option<u32> {
        self.codes
            .get(symbol)
            .copied()
            .or_else(|| hex::parse_placeholder(symbol))
    }

    /// Look up a window of bytes as one code, first byte most significant.
    pub fn probe(&self, window: &[u8]) -> Probe<'_> {
        if window.is_empty() || window.len() > hex::MAX_CODE_BYTES {
            return Probe::Unmapped;
        }
        if window.len() > 1 && window[0] == 0 {
            return Probe::Degenerate;
        }
        match self.symbol(hex::assemble(window)) {
            Some(symbol) => Probe::Mapped(symbol),
            None => Probe::Unmapped,
        }
    }

    /// Number of defined codes.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if no code is defined.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Length in characters of the longest symbol.
    pub fn longest_symbol(&self) -> usize {
        self.longest_symbol
    }

    /// Width in bytes of the widest defined code.
    pub fn widest_code(&self) -> usize {
        self.symbols
            .keys()
            .map(|&code| hex::byte_width(code))
            .max()
            .unwrap_or(1)
    }

    /// Counters from loading.
    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

fn parse_code(code: &str) -> std::result::Result<u32, String> {
    if code.is_empty() {
        return Err("empty code".to_string());
    }
    let value =
        u64::from_str_radix(code, 16).map_err(|_| format!("'{}' is not a hex code", code))?;
    if hex::hex_width(value).is_none() {
        return Err(format!("code '{}' is wider than 4 bytes", code));
    }
    Ok(value as u32)
}

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

//! Hex rendering and byte assembly for table codes.

use crate::error::{ErrorCode, Result, ToolError};

/// Widest supported code in bytes.
pub const MAX_CODE_BYTES: usize = 4;

/// Number of hex digits used to render `value`, or `None` if it needs
/// more than eight.
pub fn hex_width(value: u64) -> Option<usize> {
    match value {
        0..=0xFF => Some(2),
        0x100..=0xFFFF => Some(4),
        0x1_0000..=0xFF_FFFF => Some(6),
        0x100_0000..=0xFFFF_FFFF => Some(8),
        _ => None,
    }
}

/// Render `value` as uppercase hex padded to 2, 4, 6 or 8 digits.
pub fn format_hex(value: u64) -> Result<String> {
    let width = hex_width(value).ok_or_else(|| {
        ToolError::new(
            ErrorCode::UnsupportedHexWidth,
            format!("value {:#X} needs more than 8 hex digits", value),
        )
    })?;
    Ok(format!("{:0width$X}", value, width = width))
}

/// Render a table code. Codes are at most 32 bits wide.
pub fn format_code(code: u32) -> String {
    let width = hex_width(u64::from(code)).unwrap_or(8);
    format!("{:0width$X}", code, width = width)
}

/// The bracketed stand-in for an unmapped code, e.g. `[9A]`.
pub fn placeholder(code: u32) -> String {
    format!("[{}]", format_code(code))
}

/// Parse a bracketed stand-in back to its code.
pub fn parse_placeholder(symbol: &str) -> Option<u32> {
    let digits = symbol.strip_prefix('[')?.strip_suffix(']')?;
    if digits.is_empty() || digits.len() > 8 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Number of bytes needed to store `value` (at least one).
pub fn byte_width(value: u32) -> usize {
    match value {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        _ => 4,
    }
}

/// Assemble up to four bytes into a code, first byte most significant.
pub fn assemble(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(MAX_CODE_BYTES)
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

/// Split a code into its bytes, first byte most significant.
pub fn split(code: u32) -> Vec<u8> {
    let width = byte_width(code);
    code.to_be_bytes()[4 - width..].to_vec()
}

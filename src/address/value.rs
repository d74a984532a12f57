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

//! Address values and their byte decomposition.

use std::fmt;
use std::str::FromStr;

use super::converter::AddressConverter;
use super::scheme::Scheme;
use crate::error::{ErrorCode, Result, ToolError};

/// Size of a copier header in front of some ROM images.
pub const COPIER_HEADER_SIZE: u32 = 0x200;

/// Address input before normalization.
///
/// Integers, hexadecimal text (`1B0000`, `0x1B0000`, `$1B0000`) and
/// in-place byte triples are all accepted and reduced to one `u32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressInput<'a> {
    /// A plain integer.
    Number(u32),
    /// Hexadecimal text.
    Text(&'a str),
    /// A (low, high, bank) triple.
    Bytes([u8; 3]),
}

impl AddressInput<'_> {
    /// Normalize to an integer.
    pub fn resolve(&self) -> Result<u32> {
        match self {
            AddressInput::Number(value) => Ok(*value),
            AddressInput::Text(text) => parse_hex_address(text),
            AddressInput::Bytes(bytes) => Ok(BytePointer::from_bytes(*bytes).address()),
        }
    }
}

impl From<u32> for AddressInput<'_> {
    fn from(value: u32) -> Self {
        AddressInput::Number(value)
    }
}

impl<'a> From<&'a str> for AddressInput<'a> {
    fn from(text: &'a str) -> Self {
        AddressInput::Text(text)
    }
}

impl From<[u8; 3]> for AddressInput<'_> {
    fn from(bytes: [u8; 3]) -> Self {
        AddressInput::Bytes(bytes)
    }
}

/// Parse a hexadecimal address with an optional `0x` or `$` prefix.
pub fn parse_hex_address(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('$'))
        .unwrap_or(trimmed)
        .replace('_', "");

    if digits.is_empty() {
        return Err(ToolError::new(
            ErrorCode::InvalidAddressLiteral,
            format!("empty address '{}'", text),
        ));
    }

    u32::from_str_radix(&digits, 16).map_err(|_| {
        ToolError::new(
            ErrorCode::InvalidAddressLiteral,
            format!("'{}' is not a hexadecimal address", text),
        )
        .with_hint("use an integer or hex digits such as 0x1B0000 or $1B0000")
    })
}

/// The space an address input is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressSpace {
    /// Header-stripped linear image offset.
    Linear,
    /// Linear offset into an image that still carries a copier header.
    Headered,
    /// A cartridge address in one of the mapping schemes.
    Cartridge(Scheme),
}

impl FromStr for AddressSpace {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pc" | "linear" => Ok(AddressSpace::Linear),
            "headered" => Ok(AddressSpace::Headered),
            other => other.parse().map(AddressSpace::Cartridge),
        }
    }
}

/// A pointer split for in-place storage, low byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BytePointer {
    pub low: u8,
    pub high: u8,
    pub bank: u8,
}

impl BytePointer {
    /// Split an address into its three bytes.
    pub fn from_address(address: u32) -> Self {
        Self {
            low: (address & 0xFF) as u8,
            high: ((address >> 8) & 0xFF) as u8,
            bank: ((address >> 16) & 0xFF) as u8,
        }
    }

    /// Build from a (low, high, bank) triple.
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            low: bytes[0],
            high: bytes[1],
            bank: bytes[2],
        }
    }

    /// Compose the 24-bit address.
    pub fn address(&self) -> u32 {
        u32::from(self.low) | (u32::from(self.high) << 8) | (u32::from(self.bank) << 16)
    }

    /// The bytes in storage order.
    pub fn bytes(&self) -> [u8; 3] {
        [self.low, self.high, self.bank]
    }
}

/// A position in the header-stripped image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressValue {
    linear: u32,
}

impl AddressValue {
    /// Wrap a linear offset.
    pub fn from_linear(offset: u32) -> Self {
        Self { linear: offset }
    }

    /// Resolve an address given in any supported form and space.
    ///
    /// Malformed input is an error; a well-formed address the scheme
    /// cannot represent yields `Ok(None)`.
    pub fn resolve<'a>(
        input: impl Into<AddressInput<'a>>,
        space: AddressSpace,
        converter: &AddressConverter,
    ) -> Result<Option<Self>> {
        let raw = input.into().resolve()?;
        let linear = match space {
            AddressSpace::Linear => Some(raw),
            AddressSpace::Headered => raw.checked_sub(COPIER_HEADER_SIZE),
            AddressSpace::Cartridge(scheme) => converter.to_linear(raw, scheme),
        };
        Ok(linear.map(Self::from_linear))
    }

    /// The linear offset.
    pub fn linear(&self) -> u32 {
        self.linear
    }

    /// The cartridge address in `scheme`, if representable.
    pub fn scheme_address(&self, scheme: Scheme, converter: &AddressConverter) -> Option<u32> {
        converter.from_linear(self.linear, scheme)
    }

    /// The in-place pointer bytes for `scheme`.
    pub fn pointer(&self, scheme: Scheme, converter: &AddressConverter) -> Option<BytePointer> {
        self.scheme_address(scheme, converter)
            .map(BytePointer::from_address)
    }

    /// Low byte of the scheme address.
    pub fn low_byte(&self, scheme: Scheme, converter: &AddressConverter) -> Option<u8> {
        self.pointer(scheme, converter).map(|p| p.low)
    }

    /// High byte of the scheme address. LoROM schemes always have bit 7 set.
    pub fn high_byte(&self, scheme: Scheme, converter: &AddressConverter) -> Option<u8> {
        self.pointer(scheme, converter).map(|p| p.high)
    }

    /// Bank byte of the scheme address.
    pub fn bank_byte(&self, scheme: Scheme, converter: &AddressConverter) -> Option<u8> {
        self.pointer(scheme, converter).map(|p| p.bank)
    }
}

impl fmt::Display for AddressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:06X}", self.linear)
    }
}

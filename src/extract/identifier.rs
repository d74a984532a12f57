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

//! Block identifiers for script output.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::block::TextBlock;

/// How a block is labelled in the script output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierStyle {
    /// `$TTTTTT:i` - table address and slot index.
    TableIndex,
    /// `i` - slot index only.
    Index,
    /// `($PPPPPP)` - where the pointer itself is stored.
    PointerAddress,
    /// `[$BBBBBB]` - where the block starts.
    BlockAddress,
    /// `$TTTTTT:i[$BBBBBB]`
    #[default]
    Combined,
}

impl IdentifierStyle {
    /// Label `block` in this style.
    pub fn format(&self, block: &TextBlock) -> String {
        match self {
            IdentifierStyle::TableIndex => {
                format!("${:06X}:{}", block.table_address, block.slot_index)
            }
            IdentifierStyle::Index => block.slot_index.to_string(),
            IdentifierStyle::PointerAddress => format!("(${:06X})", block.slot_address),
            IdentifierStyle::BlockAddress => format!("[${:06X}]", block.start),
            IdentifierStyle::Combined => format!(
                "${:06X}:{}[${:06X}]",
                block.table_address, block.slot_index, block.start
            ),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            IdentifierStyle::TableIndex => "table-index",
            IdentifierStyle::Index => "index",
            IdentifierStyle::PointerAddress => "pointer-address",
            IdentifierStyle::BlockAddress => "block-address",
            IdentifierStyle::Combined => "combined",
        }
    }
}

impl fmt::Display for IdentifierStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdentifierStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "table-index" => Ok(IdentifierStyle::TableIndex),
            "index" => Ok(IdentifierStyle::Index),
            "pointer-address" => Ok(IdentifierStyle::PointerAddress),
            "block-address" => Ok(IdentifierStyle::BlockAddress),
            "combined" => Ok(IdentifierStyle::Combined),
            other => Err(format!("unknown identifier style '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn block() -> TextBlock {
        TextBlock {
            start: 0x1B_8123,
            bytes: vec![0x41, 0x42],
            text: "AB".to_string(),
            truncated: false,
            table_address: 0x1B_0000,
            slot_index: 7,
            slot_address: 0x1B_000E,
        }
    }

    #[test_case(IdentifierStyle::TableIndex, "$1B0000:7"; "table_index")]
    #[test_case(IdentifierStyle::Index, "7"; "index")]
    #[test_case(IdentifierStyle::PointerAddress, "($1B000E)"; "pointer_address")]
    #[test_case(IdentifierStyle::BlockAddress, "[$1B8123]"; "block_address")]
    #[test_case(IdentifierStyle::Combined, "$1B0000:7[$1B8123]"; "combined")]
    fn test_format(style: IdentifierStyle, expected: &str) {
        assert_eq!(style.format(&block()), expected);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for style in [
            IdentifierStyle::TableIndex,
            IdentifierStyle::Index,
            IdentifierStyle::PointerAddress,
            IdentifierStyle::BlockAddress,
            IdentifierStyle::Combined,
        ] {
            assert_eq!(style.to_string().parse::<IdentifierStyle>(), Ok(style));
        }
        assert_eq!("block_address".parse(), Ok(IdentifierStyle::BlockAddress));
        assert!("address".parse::<IdentifierStyle>().is_err());
    }
}

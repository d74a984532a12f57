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

//! Cartridge mapping schemes.
//!
//! Each scheme maps the 24-bit CPU address space onto the flat ROM image
//! differently:
//! - LoROM: 32 KiB per bank, ROM in the upper half of each bank.
//!   Two variants differ only in which mirror (banks $00-$6F or $80-$FF)
//!   is considered canonical.
//! - HiROM: 64 KiB per bank in banks $C0-$FF, up to 4 MiB.
//! - ExLoROM / ExHiROM: extended layouts where the image grows past
//!   4 MiB and the second half lives in the lower bank range.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Deserialize;

/// Size of one 4 MiB half of an extended image.
pub const HALF_IMAGE: u32 = 0x40_0000;

/// Offset into the mirrored upper bank range ($80-$FF).
pub const FAST_ROM_BIAS: u32 = 0x80_0000;

/// HiROM bank base ($C0).
pub const HIROM_BASE: u32 = 0xC0_0000;

/// Linear offset from which LoROM1 moves into the upper mirror.
pub const LOROM1_MIRROR_START: u32 = 0x38_0000;

/// A cartridge address mapping scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// LoROM with banks $00-$6F canonical.
    #[serde(alias = "lorom")]
    LoRom1,
    /// LoROM with banks $80-$FF canonical.
    LoRom2,
    /// HiROM, banks $C0-$FF.
    HiRom,
    /// Extended HiROM, up to 8 MiB.
    ExHiRom,
    /// Extended LoROM, up to 8 MiB.
    ExLoRom,
}

impl Scheme {
    /// All schemes in report order.
    pub const ALL: [Scheme; 5] = [
        Scheme::LoRom1,
        Scheme::LoRom2,
        Scheme::HiRom,
        Scheme::ExHiRom,
        Scheme::ExLoRom,
    ];

    /// Short lowercase name used on the command line and in job files.
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::LoRom1 => "lorom1",
            Scheme::LoRom2 => "lorom2",
            Scheme::HiRom => "hirom",
            Scheme::ExHiRom => "exhirom",
            Scheme::ExLoRom => "exlorom",
        }
    }

    /// Display label used in address reports.
    pub fn label(&self) -> &'static str {
        match self {
            Scheme::LoRom1 => "(1)LoROM",
            Scheme::LoRom2 => "(2)LoROM",
            Scheme::HiRom => "HiROM",
            Scheme::ExHiRom => "ExHiROM",
            Scheme::ExLoRom => "ExLoROM",
        }
    }

    /// The scheme tried when this one rejects an address and fallback
    /// is enabled.
    pub fn fallback(&self) -> Option<Scheme> {
        match self {
            Scheme::LoRom1 => Some(Scheme::LoRom2),
            Scheme::LoRom2 => Some(Scheme::LoRom1),
            Scheme::HiRom | Scheme::ExHiRom | Scheme::ExLoRom => None,
        }
    }

    /// Linear offsets for which `to_linear(from_linear(x)) == x` holds
    /// without fallback.
    pub fn round_trip_domain(&self) -> Range<u32> {
        match self {
            Scheme::LoRom1 => 0..LOROM1_MIRROR_START,
            Scheme::LoRom2 | Scheme::HiRom => 0..HALF_IMAGE,
            Scheme::ExHiRom => 0..0x7E_0000,
            Scheme::ExLoRom => 0..0x7F_0000,
        }
    }

    /// Check whether a cartridge address lies in this scheme's input range.
    pub fn accepts(&self, address: u32) -> bool {
        match self {
            Scheme::LoRom1 => (0x00_8000..=0x6F_FFFF).contains(&address),
            Scheme::LoRom2 => (0x80_8000..=0xFF_FFFF).contains(&address),
            Scheme::HiRom => (HIROM_BASE..=0xFF_FFFF).contains(&address),
            Scheme::ExHiRom => {
                (HIROM_BASE..=0xFF_FFFF).contains(&address)
                    || (0x40_0000..=0x7D_FFFF).contains(&address)
            }
            Scheme::ExLoRom => {
                (0x80_8000..=0xFF_FFFF).contains(&address)
                    || (0x00_8000..=0x7D_FFFF).contains(&address)
            }
        }
    }

    /// Map a cartridge address to a linear offset.
    ///
    /// Returns `None` when the address is outside the scheme's input range.
    pub fn to_linear(&self, address: u32) -> Option<u32> {
        if !self.accepts(address) {
            return None;
        }

        let offset = match self {
            Scheme::LoRom1 | Scheme::LoRom2 => lorom_fold(address),
            Scheme::HiRom => address & 0x3F_FFFF,
            Scheme::ExHiRom => {
                let offset = address & 0x3F_FFFF;
                if address < HIROM_BASE {
                    offset + HALF_IMAGE
                } else {
                    offset
                }
            }
            Scheme::ExLoRom => {
                let offset = lorom_fold(address);
                if address < FAST_ROM_BIAS {
                    offset + HALF_IMAGE
                } else {
                    offset
                }
            }
        };

        Some(offset)
    }

    /// Map a linear offset to this scheme's cartridge address.
    ///
    /// Returns `None` when the offset cannot be expressed in the scheme.
    pub fn from_linear(&self, offset: u32) -> Option<u32> {
        match self {
            Scheme::LoRom1 => {
                if offset >= HALF_IMAGE {
                    return None;
                }
                let address = lorom_unfold(offset);
                if offset >= LOROM1_MIRROR_START {
                    Some(address + FAST_ROM_BIAS)
                } else {
                    Some(address)
                }
            }
            Scheme::LoRom2 => {
                if offset >= HALF_IMAGE {
                    return None;
                }
                Some(lorom_unfold(offset) + FAST_ROM_BIAS)
            }
            Scheme::HiRom => {
                if offset >= HALF_IMAGE {
                    return None;
                }
                Some(offset | HIROM_BASE)
            }
            Scheme::ExHiRom => {
                if offset >= 0x7E_0000 {
                    return None;
                }
                if offset < HALF_IMAGE {
                    Some(offset | HIROM_BASE)
                } else {
                    Some(offset)
                }
            }
            Scheme::ExLoRom => {
                if offset >= 0x7F_0000 {
                    return None;
                }
                let address = lorom_unfold(offset);
                if offset < HALF_IMAGE {
                    Some(address + FAST_ROM_BIAS)
                } else {
                    Some(address)
                }
            }
        }
    }
}

/// Drop bit 15 and fold the bank down by one bit.
fn lorom_fold(address: u32) -> u32 {
    (address & 0x7FFF) | ((address & 0x7F_0000) >> 1)
}

/// Interleave bit 15 of the offset into the bank and force bit 15 set.
fn lorom_unfold(offset: u32) -> u32 {
    ((offset << 1) & 0x7F_0000) | ((offset | 0x8000) & 0xFFFF)
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lorom1" | "lorom" => Ok(Scheme::LoRom1),
            "lorom2" => Ok(Scheme::LoRom2),
            "hirom" => Ok(Scheme::HiRom),
            "exhirom" => Ok(Scheme::ExHiRom),
            "exlorom" => Ok(Scheme::ExLoRom),
            other => Err(format!("unknown mapping scheme '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lorom1_first_bank() {
        assert_eq!(Scheme::LoRom1.from_linear(0x0000), Some(0x00_8000));
        assert_eq!(Scheme::LoRom1.from_linear(0x7FFF), Some(0x00_FFFF));
        assert_eq!(Scheme::LoRom1.from_linear(0x8000), Some(0x01_8000));
        assert_eq!(Scheme::LoRom1.to_linear(0x01_8000), Some(0x8000));
    }

    #[test]
    fn test_lorom1_moves_to_upper_mirror() {
        assert_eq!(Scheme::LoRom1.from_linear(0x37_FFFF), Some(0x6F_FFFF));
        assert_eq!(Scheme::LoRom1.from_linear(0x38_0000), Some(0xF0_8000));
        assert_eq!(Scheme::LoRom1.to_linear(0xF0_8000), None);
    }

    #[test]
    fn test_lorom2_bias() {
        assert_eq!(Scheme::LoRom2.from_linear(0x1B_0000), Some(0xB6_8000));
        assert_eq!(Scheme::LoRom2.to_linear(0xB6_8000), Some(0x1B_0000));
        assert_eq!(Scheme::LoRom2.to_linear(0x36_8000), None);
    }

    #[test]
    fn test_hirom() {
        assert_eq!(Scheme::HiRom.from_linear(0x12_3456), Some(0xD2_3456));
        assert_eq!(Scheme::HiRom.to_linear(0xD2_3456), Some(0x12_3456));
        assert_eq!(Scheme::HiRom.to_linear(0xBF_FFFF), None);
        assert_eq!(Scheme::HiRom.from_linear(HALF_IMAGE), None);
    }

    #[test]
    fn test_exhirom_upper_half() {
        assert_eq!(Scheme::ExHiRom.from_linear(0x40_0000), Some(0x40_0000));
        assert_eq!(Scheme::ExHiRom.to_linear(0x40_0000), Some(0x40_0000));
        assert_eq!(Scheme::ExHiRom.from_linear(0x00_1234), Some(0xC0_1234));
        assert_eq!(Scheme::ExHiRom.from_linear(0x7E_0000), None);
        assert_eq!(Scheme::ExHiRom.to_linear(0x7E_0000), None);
    }

    #[test]
    fn test_exlorom_halves() {
        assert_eq!(Scheme::ExLoRom.from_linear(0x00_0000), Some(0x80_8000));
        assert_eq!(Scheme::ExLoRom.from_linear(0x40_0000), Some(0x00_8000));
        assert_eq!(Scheme::ExLoRom.to_linear(0x00_8000), Some(0x40_0000));
        assert_eq!(Scheme::ExLoRom.to_linear(0x7E_0000), None);
        assert_eq!(Scheme::ExLoRom.from_linear(0x7F_0000), None);
    }

    #[test]
    fn test_round_trip_domain_edges() {
        for scheme in Scheme::ALL {
            let domain = scheme.round_trip_domain();
            for offset in [domain.start, domain.end - 1] {
                let address = scheme.from_linear(offset).unwrap();
                assert_eq!(scheme.to_linear(address), Some(offset), "{}", scheme);
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("LoROM1".parse::<Scheme>(), Ok(Scheme::LoRom1));
        assert_eq!("exhirom".parse::<Scheme>(), Ok(Scheme::ExHiRom));
        assert!("mmc3".parse::<Scheme>().is_err());
    }
}

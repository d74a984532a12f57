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

//! Rendering addresses for humans.

use super::converter::AddressConverter;
use super::scheme::Scheme;
use super::value::{AddressValue, COPIER_HEADER_SIZE};

/// How addresses are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFormat {
    /// Prefix in front of hexadecimal renderings.
    pub prefix: String,
    /// Render decimal instead of hexadecimal.
    pub decimal: bool,
    /// Text shown for addresses that are not representable.
    pub default: String,
    /// Add the copier header size back to linear offsets.
    pub header: bool,
}

impl Default for AddressFormat {
    fn default() -> Self {
        Self {
            prefix: "0x".to_string(),
            decimal: false,
            default: "N/A".to_string(),
            header: false,
        }
    }
}

impl AddressFormat {
    /// Render an optional address.
    pub fn render(&self, address: Option<u32>) -> String {
        match address {
            Some(value) if self.decimal => value.to_string(),
            Some(value) => format!("{}{:06X}", self.prefix, value),
            None => self.default.clone(),
        }
    }

    /// Render the linear offset of `value`, header included if configured.
    pub fn render_linear(&self, value: AddressValue) -> String {
        let offset = if self.header {
            value.linear().checked_add(COPIER_HEADER_SIZE)
        } else {
            Some(value.linear())
        };
        self.render(offset)
    }

    /// Render `value` in `scheme`.
    pub fn render_scheme(
        &self,
        value: AddressValue,
        scheme: Scheme,
        converter: &AddressConverter,
    ) -> String {
        self.render(value.scheme_address(scheme, converter))
    }

    /// A multi-line summary of `value` in every scheme.
    ///
    /// Schemes with identical renderings share one line.
    pub fn report(&self, value: AddressValue, converter: &AddressConverter) -> String {
        let render = |scheme| self.render_scheme(value, scheme, converter);
        let lorom1 = render(Scheme::LoRom1);
        let lorom2 = render(Scheme::LoRom2);
        let exlorom = render(Scheme::ExLoRom);
        let hirom = render(Scheme::HiRom);
        let exhirom = render(Scheme::ExHiRom);

        let mut lines = vec![
            row("TYPE", "ADDRESS"),
            row("Binary/PC", &self.render_linear(value)),
        ];

        if lorom1 == exlorom && lorom1 == lorom2 {
            lines.push(row("(1/2/Ex)LoROM", &lorom1));
        } else if lorom1 == exlorom {
            lines.push(row("(1/Ex)LoROM", &lorom1));
            lines.push(row("(2)LoROM", &lorom2));
        } else if lorom2 == exlorom {
            lines.push(row("(1)LoROM", &lorom1));
            lines.push(row("(2/Ex)LoROM", &lorom2));
        } else {
            lines.push(row("(1)LoROM", &lorom1));
            lines.push(row("(2)LoROM", &lorom2));
            lines.push(row("ExLoROM", &exlorom));
        }

        if hirom == exhirom {
            lines.push(row("Ex/HiROM", &hirom));
        } else {
            lines.push(row("HiROM", &hirom));
            lines.push(row("ExHiROM", &exhirom));
        }

        lines.join("\n")
    }
}

fn row(label: &str, value: &str) -> String {
    format!("{:>13}: {}", label, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_hex_padding() {
        let format = AddressFormat::default();
        assert_eq!(format.render(Some(0x8000)), "0x008000");
        assert_eq!(format.render(None), "N/A");
    }

    #[test]
    fn test_render_decimal() {
        let format = AddressFormat {
            decimal: true,
            ..AddressFormat::default()
        };
        assert_eq!(format.render(Some(0x100)), "256");
    }

    #[test]
    fn test_render_linear_with_header() {
        let format = AddressFormat {
            header: true,
            prefix: "$".to_string(),
            ..AddressFormat::default()
        };
        assert_eq!(format.render_linear(AddressValue::from_linear(0)), "$000200");
    }

    #[test]
    fn test_report_merges_lorom1_and_exlorom_above_mirror() {
        let converter = AddressConverter::new();
        // At 0x380000 LoROM1 has moved into the upper mirror, like ExLoROM.
        let report = AddressFormat::default().report(AddressValue::from_linear(0x38_0000), &converter);
        assert!(report.contains("(1/2/Ex)LoROM: 0xF08000"), "{}", report);
        assert!(report.contains("Ex/HiROM: 0xF80000"), "{}", report);
    }

    #[test]
    fn test_report_low_offset() {
        let converter = AddressConverter::new();
        let report = AddressFormat::default().report(AddressValue::from_linear(0x8000), &converter);
        assert!(report.contains("(1)LoROM: 0x018000"), "{}", report);
        assert!(report.contains("(2/Ex)LoROM: 0x818000"), "{}", report);
        assert!(report.contains("Binary/PC: 0x008000"), "{}", report);
    }

    #[test]
    fn test_report_upper_half() {
        let converter = AddressConverter::new();
        let report = AddressFormat::default().report(AddressValue::from_linear(0x40_0000), &converter);
        assert!(report.contains("(1)LoROM: N/A"), "{}", report);
        assert!(report.contains("ExLoROM: 0x008000"), "{}", report);
        assert!(report.contains("HiROM: N/A"), "{}", report);
        assert!(report.contains("ExHiROM: 0x400000"), "{}", report);
    }
}

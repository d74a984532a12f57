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

//! Pointer report, one CSV row per slot.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::address::AddressFormat;
use crate::extract::{Extraction, PointerEntry};

/// Column names of the report.
pub const REPORT_COLUMNS: [&str; 9] = [
    "table_address",
    "table_index",
    "slot_index",
    "slot_address",
    "pointer",
    "length",
    "linear_offset",
    "scheme_address",
    "duplicate",
];

/// Render one row.
pub fn report_row(entry: &PointerEntry, format: &AddressFormat) -> String {
    [
        format.render(Some(entry.table_address)),
        entry.table_index.to_string(),
        entry.slot_index.to_string(),
        format.render(Some(entry.slot_address)),
        format.render(Some(entry.pointer)),
        entry.length.to_string(),
        format.render(entry.target),
        format.render(entry.scheme_address),
        entry.duplicate.to_string(),
    ]
    .join(",")
}

/// Write the report, header first.
pub fn write_report_to<W: Write>(
    writer: &mut W,
    extraction: &Extraction,
    format: &AddressFormat,
) -> io::Result<()> {
    writeln!(writer, "{}", REPORT_COLUMNS.join(","))?;
    for entry in extraction.pointers() {
        writeln!(writer, "{}", report_row(entry, format))?;
    }
    Ok(())
}

/// Write the report to a file.
pub fn write_report(
    extraction: &Extraction,
    format: &AddressFormat,
    path: &Path,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_report_to(&mut writer, extraction, format)?;
    writer.flush()
}

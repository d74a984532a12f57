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

//! Script text writer.
//!
//! Every distinct block becomes a `<<identifier>>` line followed by its
//! decoded text. Blocks are separated by a single newline:
//!
//! ```text
//! <<$000010:0[$000040]>>
//! AB
//! <<$000010:1[$000048]>>
//! C
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::extract::{Extraction, IdentifierStyle};

/// Render the script for all blocks of `extraction`.
pub fn render_script(extraction: &Extraction, style: IdentifierStyle) -> String {
    let mut out = String::new();
    for (index, block) in extraction.blocks().iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str("<<");
        out.push_str(&style.format(block));
        out.push_str(">>\n");
        out.push_str(&block.text);
    }
    out
}

/// Write the script to `writer`.
pub fn write_script_to<W: Write>(
    writer: &mut W,
    extraction: &Extraction,
    style: IdentifierStyle,
) -> io::Result<()> {
    writer.write_all(render_script(extraction, style).as_bytes())
}

/// Write the script to a file.
pub fn write_script(extraction: &Extraction, style: IdentifierStyle, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_script_to(&mut writer, extraction, style)?;
    writer.flush()
}

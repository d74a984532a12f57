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

//! Writing extraction results to disk.
//!
//! An extraction named `name` in `out_dir` produces:
//! - `out_dir/name.txt`: the decoded script
//! - `out_dir/name.csv`: the pointer report
//! - `out_dir/name/<start>.bin`: raw bytes of each block

pub mod blocks;
pub mod report;
pub mod script;

pub use blocks::write_blocks;
pub use report::write_report;
pub use script::{render_script, write_script};

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::address::AddressFormat;
use crate::error::{Result, ToolError};
use crate::extract::{Extraction, IdentifierStyle};

/// Where the files of one extraction go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub script: PathBuf,
    pub report: PathBuf,
    pub blocks: PathBuf,
}

impl OutputPaths {
    /// Paths for an extraction called `name` under `out_dir`.
    pub fn new(out_dir: &Path, name: &str) -> Self {
        Self {
            script: out_dir.join(format!("{}.txt", name)),
            report: out_dir.join(format!("{}.csv", name)),
            blocks: out_dir.join(name),
        }
    }
}

/// Write the report and block dumps, plus the script if `with_script`.
///
/// Returns the number of block files written.
pub fn write_extraction(
    extraction: &Extraction,
    paths: &OutputPaths,
    style: IdentifierStyle,
    with_script: bool,
) -> Result<usize> {
    fs::create_dir_all(&paths.blocks).map_err(|e| ToolError::io(&paths.blocks, e))?;

    let written = write_blocks(extraction, &paths.blocks)
        .map_err(|e| ToolError::io(&paths.blocks, e))?;
    write_report(extraction, &AddressFormat::default(), &paths.report)
        .map_err(|e| ToolError::io(&paths.report, e))?;
    if with_script {
        write_script(extraction, style, &paths.script)
            .map_err(|e| ToolError::io(&paths.script, e))?;
    }

    info!(
        "wrote {} block file(s), {} pointer(s) to {}",
        written.len(),
        extraction.pointers().len(),
        paths.report.display()
    );
    Ok(written.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths() {
        let paths = OutputPaths::new(Path::new("out"), "menu");
        assert_eq!(paths.script, Path::new("out/menu.txt"));
        assert_eq!(paths.report, Path::new("out/menu.csv"));
        assert_eq!(paths.blocks, Path::new("out/menu"));
    }

    #[test]
    fn test_write_empty_extraction() {
        let dir = TempDir::new().unwrap();
        let paths = OutputPaths::new(&dir.path().join("nested"), "empty");
        let written =
            write_extraction(&Extraction::new(), &paths, IdentifierStyle::Index, true).unwrap();

        assert_eq!(written, 0);
        assert!(paths.blocks.is_dir());
        assert!(paths.report.exists());
        assert_eq!(fs::read_to_string(&paths.script).unwrap(), "");
    }
}

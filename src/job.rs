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

//! Extraction job files.
//!
//! A job names an image, a table and any number of groups. Each group
//! walks its pointer tables into one shared result, so a block referenced
//! from several tables of the same group is emitted once.
//!
//! ```toml
//! rom = "game.sfc"
//! table = "game.tbl"
//! out_dir = "out"
//! header = true
//!
//! [[group]]
//! name = "dialogue"
//! bank = "0x1B"
//!
//! [[group.tables]]
//! start = "$1B0000"
//! length = 512
//!
//! [[group.tables]]
//! start = 0x1B0400
//! length = "0x80"
//! ```
//!
//! Paths are relative to the job file.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::address::{AddressConverter, AddressInput, Scheme, DEFAULT_CACHE_CAPACITY};
use crate::codec::DEFAULT_MAX_WIDTH;
use crate::error::{ErrorCode, Result, ToolError};
use crate::extract::{
    load_image, ExtractOptions, Extraction, IdentifierStyle, PointerTable, PointerTableExtractor,
};
use crate::output::{write_extraction, OutputPaths};
use crate::table::SymbolTable;

/// An address given as an integer or as hex text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AddressLiteral {
    Number(u32),
    Text(String),
}

impl AddressLiteral {
    /// Normalize to an integer.
    pub fn resolve(&self) -> Result<u32> {
        match self {
            AddressLiteral::Number(value) => AddressInput::from(*value).resolve(),
            AddressLiteral::Text(text) => AddressInput::from(text.as_str()).resolve(),
        }
    }
}

impl From<u32> for AddressLiteral {
    fn from(value: u32) -> Self {
        AddressLiteral::Number(value)
    }
}

/// One pointer table of a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobTable {
    pub start: AddressLiteral,
    pub length: AddressLiteral,
}

impl JobTable {
    pub fn resolve(&self) -> Result<PointerTable> {
        Ok(PointerTable::new(
            self.start.resolve()?,
            self.length.resolve()?,
        ))
    }
}

/// Pointer tables extracted together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobGroup {
    pub name: String,
    #[serde(default)]
    pub id_style: IdentifierStyle,
    #[serde(default = "default_scheme")]
    pub scheme: Scheme,
    #[serde(default = "default_pointer_width")]
    pub pointer_width: usize,
    #[serde(default)]
    pub bank: Option<AddressLiteral>,
    /// Let LoROM1 and LoROM2 pointers retry each other.
    #[serde(default = "default_fallback")]
    pub fallback: bool,
    /// Write files for this group.
    #[serde(default = "default_output")]
    pub output: bool,
    #[serde(default)]
    pub tables: Vec<JobTable>,
}

impl JobGroup {
    /// A group with default settings and no tables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_style: IdentifierStyle::default(),
            scheme: default_scheme(),
            pointer_width: default_pointer_width(),
            bank: None,
            fallback: default_fallback(),
            output: default_output(),
            tables: Vec::new(),
        }
    }

    /// Extraction options for this group.
    pub fn options(&self, max_width: usize) -> Result<ExtractOptions> {
        let bank = match &self.bank {
            Some(literal) => {
                let value = literal.resolve()?;
                let bank = u8::try_from(value).map_err(|_| {
                    ToolError::new(
                        ErrorCode::InvalidJob,
                        format!("group '{}': bank ${:X} is not a single byte", self.name, value),
                    )
                })?;
                Some(bank)
            }
            None => None,
        };

        Ok(ExtractOptions {
            scheme: self.scheme,
            pointer_width: self.pointer_width,
            bank,
            max_width,
            fallback: self.fallback,
            ..ExtractOptions::default()
        })
    }

    /// The group's pointer tables as offsets.
    pub fn pointer_tables(&self) -> Result<Vec<PointerTable>> {
        self.tables.iter().map(JobTable::resolve).collect()
    }

    /// Walk every table of the group over `image`.
    pub fn extract(
        &self,
        image: &[u8],
        symbols: &SymbolTable,
        converter: &AddressConverter,
        max_width: usize,
    ) -> Result<Extraction> {
        let extractor = PointerTableExtractor::new(symbols, converter, self.options(max_width)?)?;
        let extraction = extractor.extract_all(image, &self.pointer_tables()?)?;
        info!(
            "group '{}': {} pointer(s), {} distinct block(s)",
            self.name,
            extraction.pointers().len(),
            extraction.blocks().len()
        );
        Ok(extraction)
    }
}

/// A job file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub rom: PathBuf,
    #[serde(default)]
    pub table: Option<PathBuf>,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Whether the image carries a copier header.
    #[serde(default)]
    pub header: bool,
    #[serde(default = "default_max_code_width")]
    pub max_code_width: usize,
    #[serde(default, rename = "group")]
    pub groups: Vec<JobGroup>,
}

/// What running one group produced.
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    pub name: String,
    pub extraction: Extraction,
    /// Block files written, zero when output is off.
    pub files: usize,
}

impl Job {
    /// Parse and validate a job from TOML text.
    pub fn parse(source: &str) -> Result<Self> {
        let job: Job = toml::from_str(source)
            .map_err(|e| ToolError::new(ErrorCode::InvalidJob, e.to_string()))?;
        job.validate()?;
        Ok(job)
    }

    /// Read a job file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
        Self::parse(&source).map_err(|e| {
            let message = format!("{}: {}", path.display(), e.message);
            ToolError { message, ..e }
        })
    }

    fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(ToolError::new(ErrorCode::InvalidJob, "job has no groups")
                .with_hint("add at least one [[group]] section"));
        }
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(ToolError::new(ErrorCode::InvalidJob, "group without a name"));
            }
            if group.tables.is_empty() {
                return Err(ToolError::new(
                    ErrorCode::InvalidJob,
                    format!("group '{}' has no pointer tables", group.name),
                )
                .with_hint("add a [[group.tables]] section with start and length"));
            }
        }
        Ok(())
    }

    /// Run every group, writing output relative to `base`.
    pub fn run(&self, base: &Path) -> Result<Vec<GroupOutcome>> {
        let image = load_image(&base.join(&self.rom), self.header)?;
        let symbols = match &self.table {
            Some(path) => SymbolTable::from_file(&base.join(path))?,
            None => {
                warn!("job has no table; only reports and block files are written");
                SymbolTable::new()
            }
        };
        let converter = AddressConverter::new().with_cache(DEFAULT_CACHE_CAPACITY);
        let out_dir = base.join(&self.out_dir);

        let mut outcomes = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let extraction = group.extract(&image, &symbols, &converter, self.max_code_width)?;
            let files = if group.output {
                write_extraction(
                    &extraction,
                    &OutputPaths::new(&out_dir, &group.name),
                    group.id_style,
                    self.table.is_some(),
                )?
            } else {
                0
            };
            outcomes.push(GroupOutcome {
                name: group.name.clone(),
                extraction,
                files,
            });
        }
        Ok(outcomes)
    }
}

fn default_scheme() -> Scheme {
    Scheme::LoRom1
}

fn default_pointer_width() -> usize {
    2
}

fn default_fallback() -> bool {
    true
}

fn default_output() -> bool {
    true
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_max_code_width() -> usize {
    DEFAULT_MAX_WIDTH
}

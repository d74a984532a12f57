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

//! Pointer table extraction and job runs over a small synthetic image.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use sfcscript::address::COPIER_HEADER_SIZE;
use sfcscript::extract::{IdentifierStyle, TextBlock};
use sfcscript::job::Job;
use sfcscript::output::{render_script, report};
use sfcscript::{AddressFormat, ErrorCode, Extraction, PointerTable, SymbolTable};
use tempfile::TempDir;

const TABLE: &str = "\
20= 
21=!
48=H
57=W
64=d
65=e
6C=l
6F=o
72=r
FE=\\n
F1**=<name **>
";

/// A 64 KiB LoROM image with two pointer tables in bank $01.
fn image() -> Vec<u8> {
    let mut data = vec![0u8; 0x1_0000];
    // Table one: three slots, the last repeats the first.
    data[0x8000..0x8006].copy_from_slice(&[0x00, 0x81, 0x10, 0x81, 0x00, 0x81]);
    // Table two: one block shared with table one, one new.
    data[0x8020..0x8024].copy_from_slice(&[0x10, 0x81, 0x20, 0x81]);
    // A long pointer to the last block.
    data[0x8030..0x8033].copy_from_slice(&[0x20, 0x81, 0x01]);

    data[0x8100..0x8106].copy_from_slice(&[0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x00]);
    data[0x8110..0x811D].copy_from_slice(&[
        0x48, 0x65, 0x6C, 0x6C, 0x6F, 0xFE, 0x57, 0x6F, 0x72, 0x6C, 0x64, 0x21, 0x00,
    ]);
    data[0x8120..0x8124].copy_from_slice(&[0xF1, 0x00, 0x21, 0x00]);
    data
}

fn tables() -> [PointerTable; 2] {
    [PointerTable::new(0x8000, 6), PointerTable::new(0x8020, 4)]
}

fn extraction() -> Extraction {
    let symbols = SymbolTable::parse(TABLE);
    sfcscript::extract_script(&image(), &symbols, &tables()).unwrap()
}

// ============================================================================
// Library
// ============================================================================

#[test]
fn test_blocks_are_deduplicated_across_tables() {
    let extraction = extraction();
    assert_eq!(extraction.pointers().len(), 5);
    assert_eq!(extraction.table_count(), 2);

    let starts: Vec<u32> = extraction.blocks().iter().map(|b| b.start).collect();
    assert_eq!(starts, vec![0x8100, 0x8110, 0x8120]);

    let duplicates: Vec<bool> = extraction.pointers().iter().map(|p| p.duplicate).collect();
    assert_eq!(duplicates, vec![false, false, true, true, false]);
}

#[test]
fn test_block_contents() {
    let extraction = extraction();
    let block: &TextBlock = extraction.block_at(0x8110).unwrap();
    assert_eq!(block.text, "Hello\nWorld!");
    assert_eq!(block.len(), 12);
    assert!(!block.truncated);

    let name = extraction.block_at(0x8120).unwrap();
    assert_eq!(name.text, "<name 00>!");
    assert_eq!(name.table_address, 0x8020);
    assert_eq!(name.slot_index, 1);
}

#[test]
fn test_table_in_lorom1_upper_mirror() {
    let mut data = vec![0u8; 0x38_0200];
    data[0x38_0000..0x38_0002].copy_from_slice(&[0x00, 0x81]);
    data[0x38_0100..0x38_0103].copy_from_slice(&[0x48, 0x6F, 0x00]);

    let symbols = SymbolTable::parse(TABLE);
    let extraction =
        sfcscript::extract_script(&data, &symbols, &[PointerTable::new(0x38_0000, 2)]).unwrap();

    assert_eq!(extraction.pointers()[0].pointer, 0xF0_8100);
    assert_eq!(extraction.pointers()[0].target, Some(0x38_0100));
    assert_eq!(extraction.block_at(0x38_0100).unwrap().text, "Ho");
}

#[test]
fn test_script_output() {
    let script = render_script(&extraction(), IdentifierStyle::Combined);
    insta::assert_snapshot!(script, @r"
    <<$008000:0[$008100]>>
    Hello
    <<$008000:1[$008110]>>
    Hello
    World!
    <<$008020:1[$008120]>>
    <name 00>!
    ");
}

#[test]
fn test_script_output_pointer_style() {
    let script = render_script(&extraction(), IdentifierStyle::PointerAddress);
    insta::assert_snapshot!(script, @r"
    <<($008000)>>
    Hello
    <<($008002)>>
    Hello
    World!
    <<($008022)>>
    <name 00>!
    ");
}

#[test]
fn test_report_output() {
    let mut out = Vec::new();
    report::write_report_to(&mut out, &extraction(), &AddressFormat::default()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\
table_address,table_index,slot_index,slot_address,pointer,length,linear_offset,scheme_address,duplicate
0x008000,0,0,0x008000,0x018100,5,0x008100,0x018100,false
0x008000,0,1,0x008002,0x018110,12,0x008110,0x018110,false
0x008000,0,2,0x008004,0x018100,5,0x008100,0x018100,true
0x008020,1,0,0x008020,0x018110,12,0x008110,0x018110,true
0x008020,1,1,0x008022,0x018120,3,0x008120,0x018120,false
"
    );
}

#[test]
fn test_table_past_end_is_an_error() {
    let symbols = SymbolTable::parse(TABLE);
    let err = sfcscript::extract_script(&image(), &symbols, &[PointerTable::new(0xFFF0, 0x20)])
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PointerTableOutOfRange);
}

#[test]
fn test_truncated_block() {
    let symbols = SymbolTable::parse(TABLE);
    let mut data = image();
    data.truncate(0x8108);
    data[0x8100..0x8108].copy_from_slice(&[0x48; 8]);

    let extraction =
        sfcscript::extract_script(&data, &symbols, &[PointerTable::new(0x8000, 2)]).unwrap();
    let block = &extraction.blocks()[0];
    assert!(block.truncated);
    assert_eq!(block.text, "HHHHHH");
}

// ============================================================================
// Jobs
// ============================================================================

fn write_fixture(dir: &Path) {
    let mut rom = vec![0xFFu8; COPIER_HEADER_SIZE as usize];
    rom.extend(image());
    fs::write(dir.join("game.sfc"), rom).unwrap();
    fs::write(dir.join("game.tbl"), TABLE).unwrap();
    fs::write(
        dir.join("dump.toml"),
        r#"
rom = "game.sfc"
table = "game.tbl"
out_dir = "out"
header = true

[[group]]
name = "intro"

[[group.tables]]
start = "0x8000"
length = 6

[[group.tables]]
start = "$8020"
length = 4

[[group]]
name = "names"
pointer_width = 3
output = false
tables = [{ start = 0x8030, length = 3 }]
"#,
    )
    .unwrap();
}

#[test]
fn test_job_run_writes_files() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let job = Job::load(&dir.path().join("dump.toml")).unwrap();
    let outcomes = job.run(dir.path()).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].name, "intro");
    assert_eq!(outcomes[0].files, 3);
    assert_eq!(outcomes[1].files, 0);
    assert_eq!(outcomes[1].extraction.blocks()[0].text, "<name 00>!");

    let out = dir.path().join("out");
    let script = fs::read_to_string(out.join("intro.txt")).unwrap();
    assert_eq!(script, render_script(&outcomes[0].extraction, IdentifierStyle::Combined));
    assert!(out.join("intro.csv").exists());
    assert_eq!(
        fs::read(out.join("intro").join("33024.bin")).unwrap(),
        vec![0x48, 0x65, 0x6C, 0x6C, 0x6F]
    );
    assert!(out.join("intro").join("33040.bin").exists());
    assert!(out.join("intro").join("33056.bin").exists());
    assert!(!out.join("names.txt").exists());
}

#[test]
fn test_job_missing_rom() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("job.toml"),
        "rom = \"missing.sfc\"\n[[group]]\nname = \"x\"\ntables = [{ start = 0, length = 2 }]\n",
    )
    .unwrap();

    let job = Job::load(&dir.path().join("job.toml")).unwrap();
    let err = job.run(dir.path()).unwrap_err();
    assert_eq!(err.code, ErrorCode::Io);
    assert!(err.message.contains("missing.sfc"));
}

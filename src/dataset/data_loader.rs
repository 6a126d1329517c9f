use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::dataset::layout::{ColumnLayout, RawRow};
use crate::dataset::numeric::{is_placeholder, parse_num};
use crate::error::{DatasetError, Result};
use crate::food_record::{resolve_category, FoodRecord};

const SYNTHETIC_CODE_PREFIX: &str = "AUTO-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyName,
    EmptyEnergy,
    PlaceholderEnergy,
    NonPositiveEnergy,
}

/// Row accounting for one build run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub rows_read: usize,
    pub blank_rows: usize,
    pub rejected_rows: usize,
    pub records_retained: usize,
    /// Cells that were not valid UTF-8 and were read as empty.
    pub undecodable_cells: usize,
    /// Codes that occur more than once in the output, in first-seen order.
    pub duplicate_codes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub records: Vec<FoodRecord>,
    pub report: BuildReport,
}

/// Applies the validity gate to one row and assembles the record.
///
/// The returned record keeps the source food code, which may be empty; codes
/// are filled in afterwards by [`assign_synthetic_codes`].
pub fn admit_row(row: &RawRow<'_>, layout: &ColumnLayout) -> std::result::Result<FoodRecord, RejectReason> {
    let name = row.cell(layout.name);
    if name.is_empty() {
        return Err(RejectReason::EmptyName);
    }
    let energy = row.cell(layout.energy_kcal);
    if energy.is_empty() {
        return Err(RejectReason::EmptyEnergy);
    }
    if is_placeholder(energy) {
        return Err(RejectReason::PlaceholderEnergy);
    }
    let energy_kcal = parse_num(energy);
    if energy_kcal <= 0.0 {
        return Err(RejectReason::NonPositiveEnergy);
    }

    let name_phonetic = layout
        .name_phonetic
        .map(|index| row.cell(index))
        .filter(|reading| !reading.is_empty())
        .map(str::to_string);

    Ok(FoodRecord {
        food_code: row.cell(layout.food_code).to_string(),
        name_primary: name.to_string(),
        name_phonetic,
        category: resolve_category(row.cell(layout.food_group)),
        energy_kcal,
        protein_g: parse_num(row.cell(layout.protein)),
        fat_g: parse_num(row.cell(layout.fat)),
        carbohydrate_g: parse_num(row.cell(layout.carbohydrate)),
        water_g: parse_num(row.cell(layout.water)),
    })
}

/// Gives every record without a source code one derived from its 1-based
/// position in the retained sequence.
pub fn assign_synthetic_codes(records: &mut [FoodRecord]) {
    for (position, record) in records.iter_mut().enumerate() {
        if record.food_code.is_empty() {
            record.food_code = format!("{}{:05}", SYNTHETIC_CODE_PREFIX, position + 1);
        }
    }
}

pub fn find_duplicate_codes(records: &[FoodRecord]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for record in records {
        let count = seen.entry(record.food_code.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(record.food_code.clone());
        }
    }
    duplicates
}

fn physical_lines(table: &[u8]) -> usize {
    let breaks = table.iter().filter(|&&b| b == b'\n').count();
    match table.last() {
        Some(b'\n') | None => breaks,
        Some(_) => breaks + 1,
    }
}

/// Turns the raw table bytes into normalized records.
///
/// Header rows are skipped by physical line number and checked against the
/// layout signature before any data row is looked at. Cells are decoded one
/// by one, so bad bytes only blank out the cell they sit in.
pub fn build_records(table: impl AsRef<[u8]>, layout: &ColumnLayout) -> Result<BuildOutput> {
    let table = table.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(layout.delimiter)
        .from_reader(table);

    let mut header: Vec<ByteRecord> = Vec::with_capacity(layout.header_rows);
    let mut header_checked = false;
    let mut report = BuildReport::default();
    let mut records = Vec::new();

    for result in rdr.byte_records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        if line <= layout.header_rows {
            header.push(record);
            continue;
        }
        if !header_checked {
            layout.validate_header(&header, line - 1)?;
            header_checked = true;
        }

        report.rows_read += 1;
        let row = RawRow::new(&record);
        let undecodable = row.undecodable_cells();
        if undecodable > 0 {
            report.undecodable_cells += undecodable;
            warn!(line, cells = undecodable, "cells with invalid UTF-8 read as empty");
        }
        if row.is_blank() {
            report.blank_rows += 1;
            continue;
        }
        match admit_row(&row, layout) {
            Ok(food) => records.push(food),
            Err(reason) => {
                report.rejected_rows += 1;
                debug!(line, ?reason, name = row.cell(layout.name), "row rejected");
            }
        }
    }

    if !header_checked {
        layout.validate_header(&header, physical_lines(table))?;
    }

    assign_synthetic_codes(&mut records);
    report.records_retained = records.len();
    report.duplicate_codes = find_duplicate_codes(&records);
    for code in &report.duplicate_codes {
        warn!(food_code = %code, "food code appears more than once; the last record will win at lookup");
    }

    info!(
        rows = report.rows_read,
        blank = report.blank_rows,
        rejected = report.rejected_rows,
        retained = report.records_retained,
        "dataset built"
    );
    Ok(BuildOutput { records, report })
}

/// Reads the source table as raw bytes; only a missing or unreadable file
/// fails here.
pub fn load_source_table(source_path: &Path) -> Result<Vec<u8>> {
    std::fs::read(source_path).map_err(|source| DatasetError::SourceUnreadable {
        path: source_path.to_path_buf(),
        source,
    })
}

pub fn build_records_from_path(source_path: &Path, layout: &ColumnLayout) -> Result<BuildOutput> {
    info!(path = %source_path.display(), "reading source table");
    let table = load_source_table(source_path)?;
    build_records(&table, layout)
}

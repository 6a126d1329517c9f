use csv::ByteRecord;

use crate::error::{DatasetError, Result};

/// Column-index-to-field mapping of the source table.
///
/// The table is addressed by position, so the layout also carries a header
/// signature used to notice when the source columns have moved.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub header_rows: usize,
    pub delimiter: u8,
    pub food_group: usize,
    pub food_code: usize,
    pub name: usize,
    pub energy_kcal: usize,
    pub water: usize,
    pub protein: usize,
    pub fat: usize,
    pub carbohydrate: usize,
    pub name_phonetic: Option<usize>,
    /// `(column, label)` pairs that must appear in the header rows.
    pub header_signature: Vec<(usize, String)>,
}

impl ColumnLayout {
    /// Layout of the published composition table: group, food number, index
    /// number, name, waste rate, energy (kJ, kcal), water, protein, fat and
    /// carbohydrate breakdowns, with the phonetic reading appended last.
    pub fn standard() -> Self {
        Self {
            header_rows: 11,
            delimiter: b',',
            food_group: 0,
            food_code: 1,
            name: 3,
            energy_kcal: 6,
            water: 7,
            protein: 9,
            fat: 12,
            carbohydrate: 18,
            name_phonetic: Some(19),
            header_signature: vec![(3, "食品名".to_string()), (6, "エネルギー".to_string())],
        }
    }

    /// Verifies the header rows against the signature, failing fast on drift.
    ///
    /// `header_lines` is the number of physical lines the preamble spans;
    /// empty lines count even though the reader yields no record for them.
    pub fn validate_header(&self, header: &[ByteRecord], header_lines: usize) -> Result<()> {
        if header_lines < self.header_rows {
            return Err(DatasetError::MissingHeader {
                expected: self.header_rows,
                found: header_lines,
            });
        }
        for (column, label) in &self.header_signature {
            let found = header
                .iter()
                .any(|row| RawRow::new(row).cell(*column).contains(label.as_str()));
            if !found {
                return Err(DatasetError::LayoutMismatch {
                    column: *column,
                    expected: label.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::standard()
    }
}

/// Positional view over one raw row.
///
/// Missing cells and cells that are not valid UTF-8 read as empty.
pub struct RawRow<'a> {
    record: &'a ByteRecord,
}

impl<'a> RawRow<'a> {
    pub fn new(record: &'a ByteRecord) -> Self {
        Self { record }
    }

    pub fn cell(&self, index: usize) -> &'a str {
        self.record
            .get(index)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn undecodable_cells(&self) -> usize {
        self.record.iter().filter(|bytes| std::str::from_utf8(bytes).is_err()).count()
    }

    pub fn is_blank(&self) -> bool {
        (0..self.record.len()).all(|index| self.cell(index).is_empty())
    }
}

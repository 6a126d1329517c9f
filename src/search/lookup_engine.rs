use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::dataset::artifact::{parse_artifact, read_artifact};
use crate::food_record::FoodRecord;
use crate::search::ranking::NameQuery;

/// Upper bound on the number of records a search returns.
pub const MAX_RESULTS: usize = 20;

/// Read-only index over a built dataset.
///
/// Records keep dataset order; a code seen twice keeps the slot of its first
/// occurrence but the contents of its last.
#[derive(Debug, Clone, Default)]
pub struct FoodLookup {
    records: Vec<FoodRecord>,
    by_code: HashMap<String, usize>,
}

impl FoodLookup {
    pub fn new(records: impl IntoIterator<Item = FoodRecord>) -> Self {
        let mut lookup = Self::default();
        for record in records {
            match lookup.by_code.get(&record.food_code) {
                Some(&slot) => {
                    warn!(food_code = %record.food_code, "duplicate food code, keeping the later record");
                    lookup.records[slot] = record;
                }
                None => {
                    lookup.by_code.insert(record.food_code.clone(), lookup.records.len());
                    lookup.records.push(record);
                }
            }
        }
        lookup
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records = parse_artifact(json).context("Failed to parse food dataset JSON")?;
        Ok(Self::new(records))
    }

    pub fn from_artifact(path: &Path) -> Result<Self> {
        let records = read_artifact(path)
            .with_context(|| format!("Failed to load food dataset from {:?}", path))?;
        let lookup = Self::new(records);
        info!(path = %path.display(), foods = lookup.len(), "food lookup loaded");
        Ok(lookup)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    /// Ranked name search: exact name, then prefix, then shortest name,
    /// dataset order among equals. At most [`MAX_RESULTS`] records.
    pub fn search_by_name(&self, query: &str) -> Vec<&FoodRecord> {
        let query = NameQuery::new(query);
        let mut matched: Vec<&FoodRecord> = self.records.iter().filter(|r| query.matches(r)).collect();
        matched.sort_by(|a, b| query.compare(a, b));
        matched.truncate(MAX_RESULTS);
        matched
    }

    pub fn get_food_by_code(&self, code: &str) -> Option<&FoodRecord> {
        self.by_code.get(code).map(|&slot| &self.records[slot])
    }

    /// Records whose category equals `category` exactly, in dataset order.
    pub fn search_by_category(&self, category: &str) -> Vec<&FoodRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .take(MAX_RESULTS)
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

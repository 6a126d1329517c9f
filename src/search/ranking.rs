use std::cmp::Ordering;

use crate::food_record::FoodRecord;

/// Name-search query in the two forms the matcher needs.
pub struct NameQuery<'q> {
    raw: &'q str,
    folded: String,
}

impl<'q> NameQuery<'q> {
    pub fn new(raw: &'q str) -> Self {
        Self {
            raw,
            folded: raw.trim().to_lowercase(),
        }
    }

    /// Primary name contains the raw query, or the phonetic reading contains
    /// the trimmed, case-folded one.
    pub fn matches(&self, record: &FoodRecord) -> bool {
        record.name_primary.contains(self.raw)
            || record
                .name_phonetic
                .as_deref()
                .is_some_and(|reading| reading.to_lowercase().contains(&self.folded))
    }

    fn rank_key(&self, record: &FoodRecord) -> (bool, bool, usize) {
        let name = record.name_primary.as_str();
        (name != self.raw, !name.starts_with(self.raw), name.chars().count())
    }

    /// Exact match first, then prefix matches, then shorter names.
    pub fn compare(&self, a: &FoodRecord, b: &FoodRecord) -> Ordering {
        self.rank_key(a).cmp(&self.rank_key(b))
    }
}

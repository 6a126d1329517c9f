use serde::{Deserialize, Serialize};

/// Category assigned when the source row carries no food group.
pub const UNCATEGORIZED: &str = "未分類";

/// One normalized food item. Field order is the key order of the JSON artifact.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FoodRecord {
    pub food_code: String,
    pub name_primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_phonetic: Option<String>,
    pub category: String,
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbohydrate_g: f64,
    pub water_g: f64,
}

// Two-digit group numbers of the standard tables of food composition in Japan.
const FOOD_GROUPS: [(&str, &str); 18] = [
    ("01", "穀類"),
    ("02", "いも及びでん粉類"),
    ("03", "砂糖及び甘味類"),
    ("04", "豆類"),
    ("05", "種実類"),
    ("06", "野菜類"),
    ("07", "果実類"),
    ("08", "きのこ類"),
    ("09", "藻類"),
    ("10", "魚介類"),
    ("11", "肉類"),
    ("12", "卵類"),
    ("13", "乳類"),
    ("14", "油脂類"),
    ("15", "菓子類"),
    ("16", "し好飲料類"),
    ("17", "調味料及び香辛料類"),
    ("18", "調理済み流通食品類"),
];

/// Resolves a food-group cell to a category name.
///
/// Group numbers map to their names, any other text is kept verbatim and an
/// empty cell falls back to [`UNCATEGORIZED`].
pub fn resolve_category(group_cell: &str) -> String {
    let cell = group_cell.trim();
    if cell.is_empty() {
        return UNCATEGORIZED.to_string();
    }
    FOOD_GROUPS
        .iter()
        .find(|(number, _)| *number == cell)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| cell.to_string())
}

/// Marker for a value that was not measured.
pub const NOT_MEASURED: &str = "-";
/// Marker for a trace amount.
pub const TRACE: &str = "Tr";
/// Marker for an estimated zero.
pub const ESTIMATED_ZERO: &str = "(0)";

pub const PLACEHOLDER_TOKENS: [&str; 3] = [NOT_MEASURED, TRACE, ESTIMATED_ZERO];

const PARENTHESES: [char; 4] = ['(', ')', '（', '）'];

pub fn is_placeholder(cell: &str) -> bool {
    PLACEHOLDER_TOKENS.contains(&cell.trim())
}

/// Coerces a nutrient cell to a number.
///
/// Empty cells, placeholder tokens and anything carrying a parenthesis
/// (annotated or estimated values) become 0, as does text that is not a
/// finite decimal number.
pub fn parse_num(cell: &str) -> f64 {
    let value = cell.trim();
    if value.is_empty() || is_placeholder(value) || value.contains(&PARENTHESES[..]) {
        return 0.0;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

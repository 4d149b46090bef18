use crate::domain::CellValue;

/// Columns that are never weighted and pass through unchanged
pub const DESCRIPTIVE_COLUMNS: &[&str] = &[
    "Inf",
    "Rec",
    "Name",
    "Nat",
    "Club",
    "Division",
    "Position",
    "Preferred Foot",
];

const UNIT_COLUMNS: &[&str] = &["Height", "Weight"];
const AGE_COLUMN: &str = "Age";
const UNRATED: i64 = 1;
const PLACEHOLDER: &str = "-";

/// True for columns that hold weighted skill attributes
pub fn is_skill_column(column: &str) -> bool {
    !DESCRIPTIVE_COLUMNS.contains(&column)
        && !UNIT_COLUMNS.contains(&column)
        && column != AGE_COLUMN
}

/// Clean one cell into its canonical form.
///
/// Total: malformed values come back unchanged instead of failing the import.
pub fn normalize_cell(column: &str, value: CellValue) -> CellValue {
    if UNIT_COLUMNS.contains(&column) {
        return normalize_measurement(value);
    }
    if column == AGE_COLUMN {
        return normalize_age(value);
    }
    if is_skill_column(column) {
        return normalize_skill(value);
    }
    value
}

// --- Measurements ("185 cm", "78 kg") ---

fn normalize_measurement(value: CellValue) -> CellValue {
    let parsed = match &value {
        CellValue::Text(text) => text.trim().split(' ').next().and_then(|t| t.parse::<i64>().ok()),
        CellValue::Float(f) => truncate_float(*f),
        _ => None,
    };
    parsed.map(CellValue::Int).unwrap_or(value)
}

// --- Age ---

fn normalize_age(value: CellValue) -> CellValue {
    let parsed = match &value {
        CellValue::Text(text) => coerce_via_float(text),
        CellValue::Float(f) => truncate_float(*f),
        _ => None,
    };
    parsed.map(CellValue::Int).unwrap_or(value)
}

// --- Skill attributes ---

fn normalize_skill(value: CellValue) -> CellValue {
    let cleaned = match &value {
        CellValue::Missing => Some(CellValue::Int(UNRATED)),
        CellValue::Int(n) => Some(CellValue::Int(*n)),
        CellValue::Float(f) if f.is_nan() => Some(CellValue::Int(UNRATED)),
        CellValue::Float(f) => truncate_float(*f).map(CellValue::Int),
        CellValue::Text(text) => normalize_skill_text(text),
    };
    cleaned.unwrap_or(value)
}

fn normalize_skill_text(text: &str) -> Option<CellValue> {
    let text = text.trim();
    if text == PLACEHOLDER {
        return Some(CellValue::Int(UNRATED));
    }
    if text.contains('-') {
        return first_range_bound(text).map(CellValue::Int);
    }
    coerce_via_float(text).map(CellValue::Int)
}

/// `"10-14"` → 10; an empty first bound reads as unrated
fn first_range_bound(text: &str) -> Option<i64> {
    let first = text.split('-').next().unwrap_or("").trim();
    if first.is_empty() {
        return Some(UNRATED);
    }
    first.parse::<i64>().ok()
}

fn coerce_via_float(text: &str) -> Option<i64> {
    text.trim().parse::<f64>().ok().and_then(truncate_float)
}

fn truncate_float(f: f64) -> Option<i64> {
    if f.is_finite() {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

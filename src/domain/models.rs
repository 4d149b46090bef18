use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const NAME_COLUMN: &str = "Name";
pub const NAT_COLUMN: &str = "Nat";
pub const CLUB_COLUMN: &str = "Club";
pub const DIVISION_COLUMN: &str = "Division";
pub const POSITION_COLUMN: &str = "Position";
pub const AGE_COLUMN: &str = "Age";

/// Sentinel division value meaning "no filter"
pub const ALL_DIVISIONS: &str = "All";

/// A single table cell, raw or normalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Raw cell from scraped text; empty text is a missing cell
    pub fn from_raw(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(text.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Missing => Ok(()),
        }
    }
}

/// One imported player row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    cells: HashMap<String, CellValue>,
}

impl PlayerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: CellValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: CellValue) {
        self.cells.insert(column.to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Display text of a descriptive field, empty when missing
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(|v| v.to_string()).unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME_COLUMN).and_then(CellValue::as_text)
    }

    pub fn position(&self) -> &str {
        self.get(POSITION_COLUMN)
            .and_then(CellValue::as_text)
            .unwrap_or("")
    }

    pub fn division(&self) -> Option<&str> {
        self.get(DIVISION_COLUMN).and_then(CellValue::as_text)
    }

    /// Numeric value of a skill attribute; unrated or unreadable cells read as `floor`
    pub fn attribute(&self, column: &str, floor: f64) -> f64 {
        self.get(column)
            .and_then(CellValue::as_number)
            .unwrap_or(floor)
    }
}

/// Cleaned player table held for the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerTable {
    pub columns: Vec<String>,
    pub players: Vec<PlayerRecord>,
}

impl PlayerTable {
    pub fn new(columns: Vec<String>, players: Vec<PlayerRecord>) -> Self {
        Self { columns, players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Exact-match division filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DivisionFilter {
    #[default]
    All,
    Only(String),
}

impl DivisionFilter {
    /// Parse the shell's filter value; the sentinel or an empty value means no filter
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => DivisionFilter::All,
            Some(v) if v == ALL_DIVISIONS => DivisionFilter::All,
            Some(v) => DivisionFilter::Only(v.to_string()),
        }
    }

    pub fn matches(&self, player: &PlayerRecord) -> bool {
        match self {
            DivisionFilter::All => true,
            DivisionFilter::Only(division) => player.division() == Some(division.as_str()),
        }
    }
}

impl fmt::Display for DivisionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivisionFilter::All => f.write_str(ALL_DIVISIONS),
            DivisionFilter::Only(d) => f.write_str(d),
        }
    }
}

/// Identity and descriptive fields carried into score tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub row: usize,
    pub name: String,
    pub nat: String,
    pub club: String,
    pub division: String,
    pub position: String,
    pub age: String,
}

impl PlayerSummary {
    pub fn from_record(row: usize, player: &PlayerRecord) -> Self {
        Self {
            row,
            name: player.text(NAME_COLUMN),
            nat: player.text(NAT_COLUMN),
            club: player.text(CLUB_COLUMN),
            division: player.text(DIVISION_COLUMN),
            position: player.text(POSITION_COLUMN),
            age: player.text(AGE_COLUMN),
        }
    }
}

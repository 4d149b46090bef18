use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use crate::catalog::attributes::KNOWN_ATTRIBUTES;
use crate::domain::{CellValue, PlayerRecord, PlayerTable, DIVISION_COLUMN, NAME_COLUMN};
use crate::errors::ImportError;
use crate::ingest::normalizer::normalize_cell;

/// Cleaned table plus the division filter domain derived from it
#[derive(Debug, Clone)]
pub struct ImportedTable {
    pub table: PlayerTable,
    pub divisions: Vec<String>,
    pub dropped_rows: usize,
}

/// Reads the first table of an exported HTML page into a [`PlayerTable`]
pub struct HtmlTableImporter {
    table_selector: Selector,
    row_selector: Selector,
}

impl HtmlTableImporter {
    pub fn new() -> Self {
        Self {
            table_selector: Selector::parse("table").expect("Failed to parse table selector"),
            row_selector: Selector::parse("tr").expect("Failed to parse row selector"),
        }
    }

    /// Import a table from a file on disk
    pub fn import_file(&self, path: &Path) -> Result<ImportedTable, ImportError> {
        info!("Importing player table from {}", path.display());

        let bytes = fs::read(path).map_err(|source| ImportError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8_lossy(&bytes);

        self.import_str(&html, &path.display().to_string())
    }

    /// Import a table from an in-memory document; `source_name` is used in errors
    pub fn import_str(&self, html: &str, source_name: &str) -> Result<ImportedTable, ImportError> {
        let document = Html::parse_document(html);

        let table = document
            .select(&self.table_selector)
            .next()
            .ok_or_else(|| ImportError::NoTable(source_name.to_string()))?;

        let rows = self.extract_rows(table);
        let (header, body) = split_header(rows)
            .ok_or_else(|| ImportError::NoTable(source_name.to_string()))?;

        let columns = disambiguate_columns(&header);
        if !columns.iter().any(|c| c == NAME_COLUMN) {
            return Err(ImportError::MissingColumn {
                source_name: source_name.to_string(),
                column: NAME_COLUMN.to_string(),
            });
        }
        report_missing_attributes(&columns);

        let total_rows = body.len();
        let players: Vec<PlayerRecord> = body
            .iter()
            .filter_map(|cells| build_record(&columns, cells))
            .collect();
        let dropped_rows = total_rows - players.len();

        info!(
            "  → Imported {} players ({} rows without a name dropped)",
            players.len(),
            dropped_rows
        );

        let divisions = collect_divisions(&players);
        debug!("  → Divisions present: {:?}", divisions);

        Ok(ImportedTable {
            table: PlayerTable::new(columns, players),
            divisions,
            dropped_rows,
        })
    }

    // --- Row Extraction ---

    fn extract_rows(&self, table: ElementRef) -> Vec<RawRow> {
        table
            .select(&self.row_selector)
            .filter(|row| belongs_to(table, *row))
            .map(read_row)
            .filter(|row| !row.cells.is_empty())
            .collect()
    }
}

impl Default for HtmlTableImporter {
    fn default() -> Self {
        Self::new()
    }
}

struct RawRow {
    is_header: bool,
    cells: Vec<String>,
}

fn read_row(row: ElementRef) -> RawRow {
    let mut is_header = false;
    let cells = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .map(|cell| {
            is_header |= cell.value().name() == "th";
            collapse_whitespace(&cell.text().collect::<String>())
        })
        .collect();
    RawRow { is_header, cells }
}

/// Rows of nested tables are skipped
fn belongs_to(table: ElementRef, row: ElementRef) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
        .is_some_and(|owner| owner.id() == table.id())
}

/// The header is the first `<th>` row, or the first row when the table has none
fn split_header(rows: Vec<RawRow>) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let header_idx = rows.iter().position(|r| r.is_header).unwrap_or(0);
    let mut rows = rows.into_iter().skip(header_idx);
    let header = rows.next()?.cells;
    let body = rows.map(|r| r.cells).collect();
    Some((header, body))
}

/// Blank header names become `Unnamed: N`, repeats get a `.N` suffix
fn disambiguate_columns(header: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let base = if raw.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                raw.clone()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn build_record(columns: &[String], cells: &[String]) -> Option<PlayerRecord> {
    let name_idx = columns.iter().position(|c| c == NAME_COLUMN)?;
    let has_name = cells.get(name_idx).is_some_and(|name| !name.is_empty());
    if !has_name {
        return None;
    }

    let mut record = PlayerRecord::new();
    for (idx, column) in columns.iter().enumerate() {
        let raw = cells
            .get(idx)
            .map(|text| CellValue::from_raw(text))
            .unwrap_or(CellValue::Missing);
        record.insert(column, normalize_cell(column, raw));
    }
    Some(record)
}

fn collect_divisions(players: &[PlayerRecord]) -> Vec<String> {
    players
        .iter()
        .filter_map(|p| p.get(DIVISION_COLUMN))
        .filter(|v| !v.is_missing())
        .map(|v| v.to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

fn report_missing_attributes(columns: &[String]) {
    let missing: Vec<&str> = KNOWN_ATTRIBUTES
        .iter()
        .copied()
        .filter(|attr| !columns.iter().any(|c| c == attr))
        .collect();
    if !missing.is_empty() {
        warn!(
            "  → {} known attributes are not in the table and will score as unrated: {}",
            missing.len(),
            missing.join(", ")
        );
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

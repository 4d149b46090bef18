use chrono::Local;
use std::path::{Path, PathBuf};

use fm_role_score::catalog::RoleCatalog;
use fm_role_score::config::settings::{ExportSettings, ScoringSettings};
use fm_role_score::domain::{CellValue, DivisionFilter};
use fm_role_score::ingest::{HtmlTableImporter, ImportedTable};
use fm_role_score::report::assembler::role_block;
use fm_role_score::report::CsvExporter;
use fm_role_score::scoring::{score_matrix, score_role};

const CATALOG: &str = r#"{
    "Goalkeepers": [
        { "role": "Goalkeeper - Defend", "role_abbr": "gkd_defend", "Handling": 1, "Reflexes": 1 }
    ],
    "Central Defenders": [
        { "role": "Ball Playing Defender - Defend", "role_abbr": "bpdd_defend", "Acceleration": 2, "Marking": 3 }
    ],
    "Full Backs": [
        { "role": "Wing-Back - Support", "role_abbr": "wbs_support", "Acceleration": 1, "Tackling": 1 }
    ]
}"#;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/players.html")
}

fn import() -> ImportedTable {
    HtmlTableImporter::new().import_file(&fixture()).unwrap()
}

fn catalog() -> RoleCatalog {
    RoleCatalog::parse(CATALOG, Path::new("test_roles.json")).unwrap()
}

#[test]
fn test_import_drops_nameless_rows_and_normalizes() {
    let imported = import();

    assert_eq!(imported.table.len(), 4);
    assert_eq!(imported.dropped_rows, 1);
    assert_eq!(imported.divisions, vec!["Championship", "La Liga"]);

    let keeper = &imported.table.players[2];
    assert_eq!(keeper.name(), Some("Paulo Gazzaniga"));
    assert_eq!(keeper.get("Height"), Some(&CellValue::Int(196)));
    assert_eq!(keeper.get("Handling"), Some(&CellValue::Int(14)));

    let defender = &imported.table.players[0];
    assert_eq!(defender.get("Handling"), Some(&CellValue::Int(1)));
    assert_eq!(defender.get("Preferred Foot"), Some(&CellValue::Text("Right".to_string())));
}

#[test]
fn test_score_export_and_read_back() {
    let imported = import();
    let catalog = catalog();
    let role = catalog.find("bpdd_defend").unwrap();

    let set = score_role(role, &imported.table, &DivisionFilter::All, &ScoringSettings::default())
        .unwrap();
    let names: Vec<&str> = set.entries.iter().map(|e| e.player.name.as_str()).collect();
    assert_eq!(names, vec!["Marc Vidal", "Tomás Ruiz"]);
    assert_eq!(set.entries[0].score, 13.0);
    assert!((set.entries[1].gap_pct - 38.46).abs() < 0.01);

    let dir = tempfile::tempdir().unwrap();
    let settings = ExportSettings::default();
    let exporter = CsvExporter::new(&settings).unwrap();
    let path = exporter
        .export_role(&role_block(&set), dir.path(), &Local::now())
        .unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), set.len());
    for (row, entry) in rows.iter().zip(&set.entries) {
        assert_eq!(&row[1], entry.player.name);
        let score: f64 = row[7].parse().unwrap();
        let gap: f64 = row[8].parse().unwrap();
        assert!((score - entry.score).abs() < 0.01);
        assert!((gap - entry.gap_pct).abs() < 0.01);
    }
}

#[test]
fn test_division_filter_and_wide_positions() {
    let imported = import();
    let catalog = catalog();
    let settings = ScoringSettings::default();
    let championship = DivisionFilter::parse(Some("Championship"));

    let bpd = score_role(catalog.find("bpdd_defend").unwrap(), &imported.table, &championship, &settings)
        .unwrap();
    assert!(bpd.is_empty());

    let wing_back = score_role(catalog.find("wbs_support").unwrap(), &imported.table, &championship, &settings)
        .unwrap();
    assert_eq!(wing_back.len(), 1);
    assert_eq!(wing_back.entries[0].player.name, "Dean Holt");

    let nowhere = DivisionFilter::parse(Some("Ligue 1"));
    let empty = score_role(catalog.find("gkd_defend").unwrap(), &imported.table, &nowhere, &settings)
        .unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.top_score, 0.0);
}

#[test]
fn test_matrix_export() {
    let imported = import();
    let matrix = score_matrix(&catalog(), &imported.table, &DivisionFilter::All, &ScoringSettings::default());

    assert_eq!(matrix.rows.len(), 4);
    // keeper: only the goalkeeper column applies
    assert_eq!(matrix.rows[2].scores, vec![Some(14.5), None, None]);

    let dir = tempfile::tempdir().unwrap();
    let settings = ExportSettings::default();
    let path = CsvExporter::new(&settings)
        .unwrap()
        .export_matrix(&matrix, dir.path(), &Local::now())
        .unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(&header[6..], ["gkd_defend", "bpdd_defend", "wbs_support"]);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[2][6], "14.50");
    assert_eq!(&rows[2][7], "");
}

#[test]
fn test_shipped_catalog_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/player_roles.json");
    let catalog = RoleCatalog::load(&path).unwrap();

    let groups: Vec<&str> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(groups, vec!["Goalkeepers", "Central Defenders", "Full Backs", "Midfielders"]);
    assert!(catalog.find("gkd_defend").is_some());
    assert!(catalog.roles().all(|r| r.total_multiplier() > 0.0));
}

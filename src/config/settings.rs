use std::path::PathBuf;

pub struct ScoringSettings {
    pub top_n: usize,
    pub floor_value: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            floor_value: 1.0, // "unrated"
        }
    }
}

pub struct ExportSettings {
    pub delimiter: u8,
    pub extension: &'static str,
    pub timestamp_format: &'static str,
    pub absent_marker: &'static str,
    pub matrix_stem: &'static str,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delimiter: b',',
            extension: "csv",
            timestamp_format: "%Y_%m_%d_%H_%M_%S",
            absent_marker: "",
            matrix_stem: "all_roles",
        }
    }
}

pub struct CatalogSettings {
    pub path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let path = std::env::var("FM_ROLES_PATH")
            .unwrap_or_else(|_| "data/player_roles.json".to_string());
        Self {
            path: PathBuf::from(path),
        }
    }
}

pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub export: ExportSettings,
    pub catalog: CatalogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scoring: ScoringSettings::default(),
            export: ExportSettings::default(),
            catalog: CatalogSettings::default(),
        }
    }

    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog.path = path;
        }
        self
    }
}

use anyhow::Result;
use chrono::{DateTime, Local};
use log::{debug, info};
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::assembler::{ROLE_HEADER, RoleReport, TopReport};
use crate::config::settings::ExportSettings;
use crate::errors::ExportError;
use crate::scoring::ScoreMatrix;

const IDENTITY_HEADER: [&str; 6] = ["Name", "Nat", "Club", "Division", "Position", "Age"];

/// Writes score tables as timestamped CSV files, never overwriting an existing file
pub struct CsvExporter<'a> {
    settings: &'a ExportSettings,
    unsafe_chars: Regex,
}

impl<'a> CsvExporter<'a> {
    pub fn new(settings: &'a ExportSettings) -> Result<Self> {
        Ok(Self {
            settings,
            unsafe_chars: Self::compile_regex()?,
        })
    }

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"[^A-Za-z0-9_-]+")
            .map_err(|e| anyhow::anyhow!("Failed to compile file name regex: {}", e))
    }

    /// One file per role block
    pub fn export_top_report(
        &self,
        report: &TopReport,
        dir: &Path,
        now: &DateTime<Local>,
    ) -> Result<Vec<PathBuf>, ExportError> {
        report
            .blocks
            .iter()
            .map(|block| self.export_role(block, dir, now))
            .collect()
    }

    pub fn export_role(
        &self,
        block: &RoleReport,
        dir: &Path,
        now: &DateTime<Local>,
    ) -> Result<PathBuf, ExportError> {
        let header: Vec<String> = ROLE_HEADER.iter().map(|h| h.to_string()).collect();
        let records: Vec<Vec<String>> = block.rows.iter().map(|r| r.fields().to_vec()).collect();

        let path = self.write_table(&block.role_abbr, dir, now, &header, &records)?;
        info!("  → Exported {} ({} rows) to {}", block.role_abbr, records.len(), path.display());
        Ok(path)
    }

    pub fn export_matrix(
        &self,
        matrix: &ScoreMatrix,
        dir: &Path,
        now: &DateTime<Local>,
    ) -> Result<PathBuf, ExportError> {
        let header: Vec<String> = IDENTITY_HEADER
            .iter()
            .map(|h| h.to_string())
            .chain(matrix.role_abbrs.iter().cloned())
            .collect();

        let records: Vec<Vec<String>> = matrix
            .rows
            .iter()
            .map(|row| {
                let p = &row.player;
                [&p.name, &p.nat, &p.club, &p.division, &p.position, &p.age]
                    .into_iter()
                    .cloned()
                    .chain(row.scores.iter().map(|score| match score {
                        Some(value) => format!("{:.2}", value),
                        None => self.settings.absent_marker.to_string(),
                    }))
                    .collect()
            })
            .collect();

        let path = self.write_table(self.settings.matrix_stem, dir, now, &header, &records)?;
        info!(
            "  → Exported {} players x {} roles to {}",
            records.len(),
            matrix.role_abbrs.len(),
            path.display()
        );
        Ok(path)
    }

    // --- File handling ---

    fn write_table(
        &self,
        stem: &str,
        dir: &Path,
        now: &DateTime<Local>,
        header: &[String],
        records: &[Vec<String>],
    ) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let stem = format!(
            "{}_{}",
            self.sanitize(stem),
            now.format(self.settings.timestamp_format)
        );
        let (file, path) = self.create_unique(dir, &stem)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.settings.delimiter)
            .from_writer(file);
        // writer (and the file) is dropped on return, success or not
        write_all(&mut writer, header, records).map_err(|source| ExportError::Csv {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// `<stem>.csv`, then `<stem>_2.csv`, `<stem>_3.csv`, ... until a free name is found
    fn create_unique(&self, dir: &Path, stem: &str) -> Result<(File, PathBuf), ExportError> {
        let ext = self.settings.extension;
        let mut attempt = 1;
        loop {
            let name = if attempt == 1 {
                format!("{stem}.{ext}")
            } else {
                format!("{stem}_{attempt}.{ext}")
            };
            let path = dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((file, path)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} exists, trying next suffix", path.display());
                    attempt += 1;
                }
                Err(source) => return Err(ExportError::Io { path, source }),
            }
        }
    }

    fn sanitize(&self, stem: &str) -> String {
        self.unsafe_chars.replace_all(stem, "_").into_owned()
    }
}

fn write_all<W: Write>(
    writer: &mut csv::Writer<W>,
    header: &[String],
    records: &[Vec<String>],
) -> csv::Result<()> {
    writer.write_record(header)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

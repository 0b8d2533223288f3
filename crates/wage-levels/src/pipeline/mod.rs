//! Offline preparation of the wage dataset.
//!
//! Joins the occupation catalog with the area wage export, annualizes the
//! hourly figures and drops occupations that never received a wage. The
//! outputs are the two artifacts served at runtime: `occupations.json` and
//! `wages.json`.

mod normalizer;
mod parser;

use crate::wages::{OccupationRecord, WageTable};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const OCCUPATIONS_ARTIFACT: &str = "occupations.json";
pub const WAGES_ARTIFACT: &str = "wages.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Occupations,
    Wages,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Occupations => write!(f, "occupation source"),
            SourceKind::Wages => write!(f, "wage source"),
        }
    }
}

/// Why a source row was left out of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum RowDefect {
    #[error("expected at least {expected} columns, found {found}")]
    TooFewColumns { found: usize, expected: usize },
    #[error("{0} is empty")]
    EmptyField(&'static str),
    #[error("{column} wage '{value}' is not a number")]
    InvalidWage { column: &'static str, value: String },
    #[error("{column} wage {value} is negative")]
    NegativeWage { column: &'static str, value: f64 },
    #[error("annual wages {0:?} are not in ascending order")]
    Unordered([u64; 4]),
    #[error("row could not be decoded: {0}")]
    Undecodable(String),
}

/// A skipped row. Logged and counted, never fatal to the run.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{input} line {line}: {reason}")]
pub struct MalformedRow {
    pub input: SourceKind,
    pub line: u64,
    pub reason: RowDefect,
}

#[derive(Debug)]
pub enum PipelineError {
    SourceRead {
        input: SourceKind,
        path: Option<PathBuf>,
        source: std::io::Error,
    },
    ArtifactWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl PipelineError {
    fn from_csv(input: SourceKind, path: Option<&Path>, err: csv::Error) -> Self {
        let source = match err.into_kind() {
            csv::ErrorKind::Io(source) => source,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{other:?}")),
        };
        PipelineError::SourceRead {
            input,
            path: path.map(Path::to_path_buf),
            source,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::SourceRead {
                input,
                path: Some(path),
                source,
            } => write!(f, "failed to read {} {}: {}", input, path.display(), source),
            PipelineError::SourceRead {
                input,
                path: None,
                source,
            } => write!(f, "failed to read {}: {}", input, source),
            PipelineError::ArtifactWrite { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            PipelineError::Serialize { path, source } => {
                write!(f, "failed to serialize {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::SourceRead { source, .. } => Some(source),
            PipelineError::ArtifactWrite { source, .. } => Some(source),
            PipelineError::Serialize { source, .. } => Some(source),
        }
    }
}

/// Counters and skipped rows for one run. Never written into the artifacts,
/// which must stay byte-identical for identical inputs.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub occupation_rows: usize,
    pub wage_rows: usize,
    pub wage_entries: usize,
    pub area_count: usize,
    pub catalog_size: usize,
    pub skipped: Vec<MalformedRow>,
}

impl PipelineReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub catalog: Vec<OccupationRecord>,
    pub table: WageTable,
    pub report: PipelineReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub occupations: PathBuf,
    pub wages: PathBuf,
}

pub struct DataPipeline;

impl DataPipeline {
    /// Opens both sources before reading either so a missing file fails the
    /// run without doing any work.
    pub fn run<P, Q>(occupations: P, wages: Q) -> Result<PipelineOutput, PipelineError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let occupations = occupations.as_ref();
        let wages = wages.as_ref();
        let occupation_file = open_source(SourceKind::Occupations, occupations)?;
        let wage_file = open_source(SourceKind::Wages, wages)?;

        info!(
            occupations = %occupations.display(),
            wages = %wages.display(),
            "starting wage data generation"
        );
        Self::process(occupation_file, wage_file, Some((occupations, wages)))
    }

    pub fn from_readers<O, W>(occupations: O, wages: W) -> Result<PipelineOutput, PipelineError>
    where
        O: Read,
        W: Read,
    {
        Self::process(occupations, wages, None)
    }

    fn process<O, W>(
        occupations: O,
        wages: W,
        paths: Option<(&Path, &Path)>,
    ) -> Result<PipelineOutput, PipelineError>
    where
        O: Read,
        W: Read,
    {
        let started_at = Utc::now();
        let mut skipped = Vec::new();

        let scan = parser::read_occupations(occupations, &mut skipped).map_err(|err| {
            PipelineError::from_csv(SourceKind::Occupations, paths.map(|(p, _)| p), err)
        })?;
        info!(occupations = scan.titles.len(), "loaded occupation catalog");

        let mut table = WageTable::new();
        let mut wage_bearing: HashSet<String> = HashSet::new();
        let mut wage_entries = 0usize;
        let wage_rows = parser::read_wages(wages, &mut skipped, |row| {
            wage_entries += 1;
            wage_bearing.insert(row.occupation_code.clone());
            table.insert(row.area_code, row.occupation_code, row.thresholds);
        })
        .map_err(|err| PipelineError::from_csv(SourceKind::Wages, paths.map(|(_, p)| p), err))?;

        let catalog: Vec<OccupationRecord> = scan
            .titles
            .into_iter()
            .filter(|(code, _)| wage_bearing.contains(code))
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .map(|(code, title)| OccupationRecord { code, title })
            .collect();

        let report = PipelineReport {
            started_at,
            finished_at: Utc::now(),
            occupation_rows: scan.rows,
            wage_rows,
            wage_entries,
            area_count: table.area_count(),
            catalog_size: catalog.len(),
            skipped,
        };

        info!(
            catalog = report.catalog_size,
            areas = report.area_count,
            wage_entries = report.wage_entries,
            skipped = report.skipped_count(),
            "wage data generation complete"
        );

        Ok(PipelineOutput {
            catalog,
            table,
            report,
        })
    }
}

impl PipelineOutput {
    /// Pretty-printed with two-space indentation.
    pub fn catalog_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.catalog)
    }

    pub fn write_artifacts<P: AsRef<Path>>(
        &self,
        output_dir: P,
    ) -> Result<ArtifactPaths, PipelineError> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir).map_err(|source| PipelineError::ArtifactWrite {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let occupations = output_dir.join(OCCUPATIONS_ARTIFACT);
        let catalog = self
            .catalog_json()
            .map_err(|source| PipelineError::Serialize {
                path: occupations.clone(),
                source,
            })?;
        fs::write(&occupations, catalog).map_err(|source| PipelineError::ArtifactWrite {
            path: occupations.clone(),
            source,
        })?;
        info!(
            path = %occupations.display(),
            entries = self.catalog.len(),
            "wrote occupation catalog"
        );

        let wages = output_dir.join(WAGES_ARTIFACT);
        write_table(&self.table, &wages)?;
        info!(path = %wages.display(), areas = self.table.area_count(), "wrote wage table");

        Ok(ArtifactPaths { occupations, wages })
    }
}

fn write_table(table: &WageTable, path: &Path) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|source| PipelineError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    table
        .write_json(&mut writer)
        .map_err(|source| PipelineError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|source| PipelineError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn open_source(input: SourceKind, path: &Path) -> Result<File, PipelineError> {
    File::open(path).map_err(|source| PipelineError::SourceRead {
        input,
        path: Some(path.to_path_buf()),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OCCUPATIONS: &str = "\"soccode\",\"Title\",\"Description\"\n\
\"11-1021\",\"General and Operations Managers\",\"Plan, direct, or coordinate\"\n\
\"15-1252\",\"Software Developers\",\"Research, design, and develop\"\n\
\"99-9999\",\"Unsurveyed Occupation\",\"No wage data\"\n";

    const WAGES: &str = "\"Area\",\"SocCode\",\"GeoLvl\",\"Level1\",\"Level2\",\"Level3\",\"Level4\"\n\
\"10180\",\"15-1252\",1,\"35.00\",\"45.00\",\"55.00\",\"65.00\"\n\
\"10180\",\"11-1021\",1,\"19.91\",\"33.72\",\"47.52\",\"61.33\"\n\
\"10180\",\"00-0000\",1,\"10.00\",\"11.00\",\"12.00\",\"13.00\"\n";

    #[test]
    fn catalog_keeps_only_wage_bearing_codes_sorted() {
        let output = DataPipeline::from_readers(OCCUPATIONS.as_bytes(), WAGES.as_bytes())
            .expect("pipeline runs");

        let codes: Vec<&str> = output.catalog.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["11-1021", "15-1252"]);
        assert_eq!(output.report.catalog_size, 2);
        assert_eq!(output.report.wage_entries, 3);
        assert_eq!(output.table.entry_count(), 3);
    }

    #[test]
    fn duplicate_area_occupation_pairs_keep_last_row() {
        let wages = "Area,SocCode,GeoLvl,Level1,Level2,Level3,Level4\n\
10180,15-1252,1,10.00,20.00,30.00,40.00\n\
10180,15-1252,1,11.00,21.00,31.00,41.00\n";
        let output = DataPipeline::from_readers(OCCUPATIONS.as_bytes(), wages.as_bytes())
            .expect("pipeline runs");
        assert_eq!(
            output.table.get("10180", "15-1252").map(|t| t.as_array()),
            Some([22_880, 43_680, 64_480, 85_280])
        );
    }

    #[test]
    fn catalog_json_uses_two_space_indent() {
        let output = DataPipeline::from_readers(OCCUPATIONS.as_bytes(), WAGES.as_bytes())
            .expect("pipeline runs");
        let json = output.catalog_json().expect("serialize");
        assert!(json.starts_with("[\n  {\n    \"code\": \"11-1021\""));
    }

    #[test]
    fn missing_source_path_is_a_read_error() {
        let error = DataPipeline::run("./no-such-occupations.csv", "./no-such-wages.csv")
            .expect_err("expected read error");
        match error {
            PipelineError::SourceRead {
                input: SourceKind::Occupations,
                path: Some(path),
                ..
            } => assert!(path.ends_with("no-such-occupations.csv")),
            other => panic!("expected source read error, got {other:?}"),
        }
    }
}

//! Runtime loading of the generated artifacts.

use crate::comparison::CostOfLivingIndex;
use crate::pipeline::{OCCUPATIONS_ARTIFACT, WAGES_ARTIFACT};
use crate::reference;
use crate::wages::{OccupationRecord, WageTable};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const COST_OF_LIVING_ARTIFACT: &str = "cost_of_living.json";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything the engines read at runtime.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Vec<OccupationRecord>,
    pub table: WageTable,
    pub cost_of_living: CostOfLivingIndex,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            catalog: reference::sample_occupations(),
            table: WageTable::new(),
            cost_of_living: CostOfLivingIndex::new(),
        }
    }
}

impl Dataset {
    /// Loads the artifacts from `dir`. A missing file falls back to its
    /// default with a warning; a file that exists but cannot be read or
    /// parsed is an error.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, DatasetError> {
        let dir = dir.as_ref();
        let defaults = Dataset::default();

        let catalog = read_artifact(&dir.join(OCCUPATIONS_ARTIFACT), |reader| {
            serde_json::from_reader::<_, Vec<OccupationRecord>>(reader)
        })?
        .unwrap_or(defaults.catalog);
        let table = read_artifact(&dir.join(WAGES_ARTIFACT), WageTable::from_reader)?
            .unwrap_or(defaults.table);
        let cost_of_living = read_artifact(
            &dir.join(COST_OF_LIVING_ARTIFACT),
            CostOfLivingIndex::from_reader,
        )?
        .unwrap_or(defaults.cost_of_living);

        info!(
            dir = %dir.display(),
            occupations = catalog.len(),
            areas = table.area_count(),
            col_areas = cost_of_living.len(),
            "loaded wage dataset"
        );

        Ok(Self {
            catalog,
            table,
            cost_of_living,
        })
    }
}

fn read_artifact<T, F>(path: &Path, parse: F) -> Result<Option<T>, DatasetError>
where
    F: FnOnce(BufReader<File>) -> Result<T, serde_json::Error>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "artifact not found; using defaults");
            return Ok(None);
        }
        Err(source) => {
            return Err(DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    parse(BufReader::new(file))
        .map(Some)
        .map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "wage-levels-dataset-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn missing_artifacts_resolve_to_defaults() {
        let dir = scratch_dir("missing");
        let dataset = Dataset::load(&dir).expect("defaults");
        assert!(dataset.table.is_empty());
        assert!(dataset.cost_of_living.is_empty());
        assert_eq!(dataset.catalog, reference::sample_occupations());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn reads_present_artifacts() {
        let dir = scratch_dir("present");
        fs::write(
            dir.join(OCCUPATIONS_ARTIFACT),
            r#"[{"code":"15-1252","title":"Software Developers"}]"#,
        )
        .expect("write catalog");
        fs::write(
            dir.join(WAGES_ARTIFACT),
            r#"{"19100":{"15-1252":[81000,110000,139000,168000]}}"#,
        )
        .expect("write table");
        fs::write(
            dir.join(COST_OF_LIVING_ARTIFACT),
            r#"{"19100":{"colIndex":101.5}}"#,
        )
        .expect("write col");

        let dataset = Dataset::load(&dir).expect("load");
        assert_eq!(dataset.catalog.len(), 1);
        assert_eq!(dataset.catalog[0].title, "Software Developers");
        assert_eq!(
            dataset.table.get("19100", "15-1252").map(|t| t.level4()),
            Some(168_000)
        );
        assert_eq!(dataset.cost_of_living.index("19100"), 101.5);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn corrupt_artifact_is_an_error() {
        let dir = scratch_dir("corrupt");
        fs::write(dir.join(WAGES_ARTIFACT), "{not json").expect("write");
        let err = Dataset::load(&dir).expect_err("corrupt table");
        assert!(matches!(err, DatasetError::Json { .. }));
        fs::remove_dir_all(dir).ok();
    }
}

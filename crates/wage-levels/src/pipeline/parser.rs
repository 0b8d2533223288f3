use super::normalizer::{annualize, clean_field, parse_hourly};
use super::{MalformedRow, RowDefect, SourceKind};
use crate::wages::WageThresholds;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

const OCCUPATION_MIN_COLUMNS: usize = 2;
const WAGE_MIN_COLUMNS: usize = 7;
const WAGE_COLUMNS: [(usize, &str); 4] = [(3, "level1"), (4, "level2"), (5, "level3"), (6, "level4")];
const PROGRESS_INTERVAL: usize = 50_000;

#[derive(Debug)]
pub(crate) struct WageRow {
    pub(crate) area_code: String,
    pub(crate) occupation_code: String,
    pub(crate) thresholds: WageThresholds,
}

#[derive(Debug, Default)]
pub(crate) struct OccupationScan {
    pub(crate) titles: HashMap<String, String>,
    pub(crate) rows: usize,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Reads `code,title,...` rows. Duplicate codes keep the last title seen.
pub(crate) fn read_occupations<R: Read>(
    reader: R,
    skipped: &mut Vec<MalformedRow>,
) -> Result<OccupationScan, csv::Error> {
    let mut scan = OccupationScan::default();

    for_each_record(reader, SourceKind::Occupations, skipped, |record, line| {
        scan.rows += 1;
        if record.len() < OCCUPATION_MIN_COLUMNS {
            return Err(RowDefect::TooFewColumns {
                found: record.len(),
                expected: OCCUPATION_MIN_COLUMNS,
            });
        }

        let code = clean_field(&record[0]);
        let title = clean_field(&record[1]);
        if code.is_empty() {
            return Err(RowDefect::EmptyField("code"));
        }
        if title.is_empty() {
            return Err(RowDefect::EmptyField("title"));
        }

        if let Some(previous) = scan.titles.insert(code.to_string(), title.to_string()) {
            debug!(line, code, %previous, "occupation code repeated; keeping latest title");
        }
        Ok(())
    })?;

    Ok(scan)
}

/// Streams `area,soc,geo_level,l1,l2,l3,l4,...` rows with hourly wages,
/// handing each valid annualized row to `visit`.
pub(crate) fn read_wages<R, F>(
    reader: R,
    skipped: &mut Vec<MalformedRow>,
    mut visit: F,
) -> Result<usize, csv::Error>
where
    R: Read,
    F: FnMut(WageRow),
{
    let mut rows = 0usize;

    for_each_record(reader, SourceKind::Wages, skipped, |record, _line| {
        rows += 1;
        if rows % PROGRESS_INTERVAL == 0 {
            debug!(rows, "processed wage rows");
        }

        visit(parse_wage_row(record)?);
        Ok(())
    })?;

    Ok(rows)
}

fn parse_wage_row(record: &csv::StringRecord) -> Result<WageRow, RowDefect> {
    if record.len() < WAGE_MIN_COLUMNS {
        return Err(RowDefect::TooFewColumns {
            found: record.len(),
            expected: WAGE_MIN_COLUMNS,
        });
    }

    let area_code = clean_field(&record[0]);
    let occupation_code = clean_field(&record[1]);
    if area_code.is_empty() {
        return Err(RowDefect::EmptyField("area"));
    }
    if occupation_code.is_empty() {
        return Err(RowDefect::EmptyField("occupation code"));
    }

    let mut annual = [0u64; 4];
    for (slot, (index, column)) in annual.iter_mut().zip(WAGE_COLUMNS) {
        let raw = &record[index];
        let hourly = parse_hourly(raw).ok_or_else(|| RowDefect::InvalidWage {
            column,
            value: raw.to_string(),
        })?;
        if hourly < 0.0 {
            return Err(RowDefect::NegativeWage {
                column,
                value: hourly,
            });
        }
        *slot = annualize(hourly);
    }

    let thresholds = WageThresholds::new(annual).map_err(|_| RowDefect::Unordered(annual))?;

    Ok(WageRow {
        area_code: area_code.to_string(),
        occupation_code: occupation_code.to_string(),
        thresholds,
    })
}

/// Drives the CSV reader, recording row-level defects and stopping only on
/// I/O failures of the underlying source.
fn for_each_record<R, F>(
    reader: R,
    input: SourceKind,
    skipped: &mut Vec<MalformedRow>,
    mut handle: F,
) -> Result<(), csv::Error>
where
    R: Read,
    F: FnMut(&csv::StringRecord, u64) -> Result<(), RowDefect>,
{
    let mut csv_reader = csv_reader(reader);
    let mut record = csv::StringRecord::new();

    loop {
        let line = csv_reader.position().line();
        match csv_reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map(|pos| pos.line()).unwrap_or(line);
                if let Err(reason) = handle(&record, line) {
                    skip(skipped, MalformedRow { input, line, reason });
                }
            }
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err),
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(line);
                let reason = RowDefect::Undecodable(err.to_string());
                skip(skipped, MalformedRow { input, line, reason });
            }
        }
    }

    Ok(())
}

fn skip(skipped: &mut Vec<MalformedRow>, row: MalformedRow) {
    warn!(input = %row.input, line = row.line, reason = %row.reason, "skipping malformed row");
    skipped.push(row);
}

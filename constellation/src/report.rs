//! Audit report over a constellation store.
//!
//! Re-derives lengths and signatures for every stored row, re-applies the
//! acceptance rules in file order and writes the results as CSV. Every row,
//! passing or not, joins the comparison set for the rows after it.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::constellation::Constellation;
use crate::corpus::Corpus;
use crate::error::StoreError;
use crate::pair::{PairSet, PairSignature, PAIR_INDICES};
use crate::segment::{segment_name, SegmentSet, SEGMENT_COUNT};
use crate::store::{store_row, CsvStore, STORE_HEADER};
use crate::validator::{Tolerances, UniquenessValidator};

/// Audit result for one stored constellation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub constellation: Constellation,
    pub segments: SegmentSet,
    pub pairs: PairSet,
    /// Human-readable reason of the first failed rule, `None` if all pass.
    pub failure: Option<String>,
}

impl ReportRow {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub rows: usize,
    pub passed: usize,
}

/// Checks `rows` in order. The cross-row check only runs for rows that pass
/// the internal checks.
pub fn check_constellations(rows: &[Constellation], tolerances: Tolerances) -> Vec<ReportRow> {
    let validator = UniquenessValidator::new(tolerances);
    let mut seen = Corpus::new();

    rows.iter()
        .map(|constellation| {
            let segments = constellation.segments();
            let pairs = PairSet::compute(&segments);
            let failure = match validator.check_internal(&segments) {
                Err(violation) => Some(violation.to_string()),
                Ok(()) => validator
                    .check_external(&pairs, &seen)
                    .err()
                    .map(|violation| violation.to_string()),
            };
            seen.commit(constellation.name(), pairs.clone());

            ReportRow {
                constellation: constellation.clone(),
                segments,
                pairs,
                failure,
            }
        })
        .collect()
}

pub fn report_header() -> Vec<String> {
    let mut header: Vec<String> = STORE_HEADER.iter().map(|s| s.to_string()).collect();
    header.push("Check Status".to_string());
    header.push("Failure Reason".to_string());
    header.extend((0..SEGMENT_COUNT).map(|i| format!("Segment {}", segment_name(i))));
    header.extend(
        PAIR_INDICES
            .iter()
            .map(|&(i, j)| format!("Segment Pair {}-{} Data", segment_name(i), segment_name(j))),
    );
    header
}

fn signature_cell(signature: &PairSignature) -> String {
    format!(
        "[{}, {}, {}]",
        signature.length_a, signature.length_b, signature.angle
    )
}

fn report_record(row: &ReportRow) -> Vec<String> {
    let mut record = store_row(&row.constellation);
    record.push(if row.passed() { "True" } else { "False" }.to_string());
    record.push(row.failure.clone().unwrap_or_default());
    record.extend(row.segments.lengths().iter().map(f64::to_string));
    record.extend(row.pairs.iter().map(signature_cell));
    record
}

pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(report_header())?;
    for row in rows {
        writer.write_record(report_record(row))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Checks the store at `store_path` and writes the report to `report_path`.
pub fn check_store(
    store_path: &Path,
    report_path: &Path,
    tolerances: Tolerances,
) -> Result<ReportSummary, StoreError> {
    let constellations = CsvStore::new(store_path).load()?;
    let rows = check_constellations(&constellations, tolerances);

    let file = File::create(report_path).map_err(|source| StoreError::Io {
        path: report_path.to_path_buf(),
        source,
    })?;
    write_report(file, &rows)?;

    let summary = ReportSummary {
        rows: rows.len(),
        passed: rows.iter().filter(|row| row.passed()).count(),
    };
    info!(
        "Checked {} constellations from {}: {} passed, report written to {}",
        summary.rows,
        store_path.display(),
        summary.passed,
        report_path.display()
    );
    Ok(summary)
}

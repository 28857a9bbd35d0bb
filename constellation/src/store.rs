//! Append-only CSV store of accepted constellations.
//!
//! One header row, then one row per constellation:
//! `name, x_A, y_A, z_A, ..., x_D, y_D, z_D`.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use glam::DVec3;

use crate::constellation::{Constellation, POINT_COUNT};
use crate::error::StoreError;

pub const NAME_COLUMN: &str = "ArrayName";

/// Columns of a store row.
pub const STORE_HEADER: [&str; 1 + 3 * POINT_COUNT] = [
    NAME_COLUMN,
    "PointA_x",
    "PointA_y",
    "PointA_z",
    "PointB_x",
    "PointB_y",
    "PointB_z",
    "PointC_x",
    "PointC_y",
    "PointC_z",
    "PointD_x",
    "PointD_y",
    "PointD_z",
];

/// Destination for committed constellations.
pub trait ConstellationSink {
    fn append(&mut self, constellation: &Constellation) -> Result<(), StoreError>;
}

impl ConstellationSink for Vec<Constellation> {
    fn append(&mut self, constellation: &Constellation) -> Result<(), StoreError> {
        self.push(constellation.clone());
        Ok(())
    }
}

/// Constellation store backed by a CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored constellation. A missing file is an empty store;
    /// any malformed row fails the whole load.
    pub fn load(&self) -> Result<Vec<Constellation>, StoreError> {
        match fs::File::open(&self.path) {
            Ok(file) => read_constellations(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConstellationSink for CsvStore {
    /// Appends one row, writing the header first if the file is new or empty.
    /// A last line without a terminator is closed before the row is added.
    fn append(&mut self, constellation: &Constellation) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let len = file.metadata().map_err(|e| self.io_error(e))?.len();
        if len > 0 && !ends_with_newline(&mut file).map_err(|e| self.io_error(e))? {
            file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if len == 0 {
            writer.write_record(STORE_HEADER)?;
        }
        write_row(&mut writer, constellation)?;
        writer.flush().map_err(|e| self.io_error(e))
    }
}

fn ends_with_newline(file: &mut fs::File) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Parses a store from any reader. The first row must be [`STORE_HEADER`];
/// input with no header at all is an empty store.
pub fn read_constellations<R: Read>(reader: R) -> Result<Vec<Constellation>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header = reader.headers()?;
    if header.is_empty() {
        return Ok(Vec::new());
    }
    if !header.iter().eq(STORE_HEADER) {
        return Err(StoreError::Header {
            found: header.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut constellations = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Header is row 1.
        let row = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        constellations.push(parse_row(&record, row)?);
    }
    Ok(constellations)
}

fn parse_row(record: &csv::StringRecord, row: u64) -> Result<Constellation, StoreError> {
    if record.len() != STORE_HEADER.len() {
        return Err(StoreError::FieldCount {
            row,
            expected: STORE_HEADER.len(),
            found: record.len(),
        });
    }

    let mut coords = [0.0; 3 * POINT_COUNT];
    for (column, coord) in coords.iter_mut().enumerate() {
        let field = &record[column + 1];
        *coord = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| StoreError::InvalidCoordinate {
                row,
                column: STORE_HEADER[column + 1].to_string(),
                value: field.to_string(),
            })?;
    }

    let points: [DVec3; POINT_COUNT] =
        std::array::from_fn(|i| DVec3::new(coords[3 * i], coords[3 * i + 1], coords[3 * i + 2]));
    Ok(Constellation::new(&record[0], points))
}

/// Writes `constellation` as a store row. Coordinates use the shortest
/// representation that parses back to the same `f64`.
pub fn write_row<W: Write>(
    writer: &mut csv::Writer<W>,
    constellation: &Constellation,
) -> Result<(), StoreError> {
    writer.write_record(store_row(constellation))?;
    Ok(())
}

pub(crate) fn store_row(constellation: &Constellation) -> Vec<String> {
    let mut row = Vec::with_capacity(STORE_HEADER.len());
    row.push(constellation.name().to_string());
    for point in constellation.points() {
        row.extend(point.to_array().iter().map(f64::to_string));
    }
    row
}

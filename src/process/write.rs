use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::{fs, io, path::Path};
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::process::raw_table::Record;
use crate::process::split::LOCATION_FIELDS;

/// Header of the output TSV; matches the field order of [`OutputRecord`].
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "strain", "virus", "host", "date", "region", "country", "division", "location",
];

/// One row of the normalized table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub strain: Option<String>,
    pub virus: String,
    pub host: Option<String>,
    pub date: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub division: Option<String>,
    pub location: Option<String>,
}

impl OutputRecord {
    /// Project a fully derived record onto the output columns; everything else is
    /// dropped.
    pub fn project(mut record: Record) -> Self {
        let [region, country, division, location] = LOCATION_FIELDS.map(|c| record.take(c));
        Self {
            strain: record.take("strain"),
            virus: record.take("virus").unwrap_or_default(),
            host: record.take("host"),
            date: record.take("date").unwrap_or_default(),
            region,
            country,
            division,
            location,
        }
    }
}

/// Serialize `records` as tab-separated text with a header row.
///
/// The whole table is encoded in memory before `path` is opened, so a
/// serialization failure never touches an existing file. The write itself
/// creates or truncates `path`, keeping an existing file's permissions.
pub fn write_tsv<P: AsRef<Path>>(path: P, records: &[OutputRecord]) -> Result<()> {
    let path = path.as_ref();
    let buf = encode_tsv(records)?;
    fs::write(path, &buf).map_err(|source| MetadataError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = records.len(), bytes = buf.len(), "wrote tsv");
    Ok(())
}

pub fn encode_tsv(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(OUTPUT_COLUMNS)?;
    for rec in records {
        wtr.serialize(rec)?;
    }
    wtr.into_inner().map_err(|e| {
        let err = e.error();
        MetadataError::Io(io::Error::new(err.kind(), err.to_string()))
    })
}

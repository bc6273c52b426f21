// src/process/mod.rs
pub mod date_parser;
pub mod filter;
pub mod load;
pub mod raw_table;
pub mod split;
pub mod utils;
pub mod write;

use std::path::Path;
use tracing::{debug, info};

use crate::error::{MetadataError, Result};
use date_parser::{normalize_date, NOT_A_TIME};
use filter::{PassageFilter, PASSAGE_COLUMN};
use raw_table::{RawTable, Record};
use split::{apply_location_split, LOCATION_COLUMN};
use write::{write_tsv, OutputRecord};

/// Columns the pipeline reads; a sheet without any of them is rejected.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    PASSAGE_COLUMN,
    LOCATION_COLUMN,
    "Isolate_Name",
    "Collection_Date",
    "Host",
];

/// Source column → output column.
pub const RENAMES: [(&str, &str); 3] = [
    ("Isolate_Name", "strain"),
    ("Collection_Date", "date"),
    ("Host", "host"),
];

#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Passage categories containing any of these terms are dropped.
    pub excluded_passages: Vec<String>,
    /// Constant written to every row's `virus` column.
    pub virus: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            excluded_passages: vec!["egg".into(), "cell".into()],
            virus: "avian_flu".into(),
        }
    }
}

/// Single-pass reshaping of a metadata sheet into the output table.
#[derive(Debug, Clone)]
pub struct MetadataNormalizer {
    config: NormalizerConfig,
    filter: PassageFilter,
}

impl MetadataNormalizer {
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        let filter = PassageFilter::new(config.excluded_passages.as_slice())?;
        Ok(Self { config, filter })
    }

    /// Read `input`, normalize it and write the TSV to `output`. Returns the
    /// number of data rows written.
    #[tracing::instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
    pub fn run(&self, input: &Path, output: &Path) -> Result<usize> {
        if !input.exists() {
            return Err(MetadataError::InputNotFound(input.to_path_buf()));
        }
        let table = load::load_first_sheet(input)?;
        let rows = self.transform(table)?;
        write_tsv(output, &rows)?;
        info!(rows = rows.len(), "normalization complete");
        Ok(rows.len())
    }

    /// Everything between load and write: filter, derive, rename, normalize, project.
    pub fn transform(&self, table: RawTable) -> Result<Vec<OutputRecord>> {
        table.require_columns(&REQUIRED_COLUMNS)?;
        let records = self.filter.retain(table.into_records());

        let mut nat = 0usize;
        let rows: Vec<OutputRecord> = records
            .into_iter()
            .map(|mut record| {
                apply_location_split(&mut record);
                self.add_virus(&mut record);
                rename_columns(&mut record);
                if normalize_record_date(&mut record) {
                    nat += 1;
                }
                OutputRecord::project(record)
            })
            .collect();

        if nat > 0 {
            debug!(count = nat, "dates replaced with {}", NOT_A_TIME);
        }
        Ok(rows)
    }

    fn add_virus(&self, record: &mut Record) {
        record.insert("virus", Some(self.config.virus.clone()));
    }
}

pub fn rename_columns(record: &mut Record) {
    for (from, to) in RENAMES {
        record.rename(from, to);
    }
}

/// Rewrite `date` in place; returns `true` when it fell back to `NaT`.
pub fn normalize_record_date(record: &mut Record) -> bool {
    let original = record.get("date").map(str::to_owned);
    let normalized = normalize_date(original.as_deref());
    let fell_back = normalized == NOT_A_TIME && original.as_deref() != Some(NOT_A_TIME);
    if fell_back {
        debug!(original = ?original, "unparseable collection date");
    }
    record.insert("date", Some(normalized));
    fell_back
}

/// Run the default pipeline from `input` to `output`.
pub fn process_metadata<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<usize> {
    MetadataNormalizer::new(NormalizerConfig::default())?.run(input.as_ref(), output.as_ref())
}

use calamine::{open_workbook_auto, Reader};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{MetadataError, Result};
use crate::process::{
    raw_table::RawTable,
    utils::{cell_text, header_text, is_blank_row},
};

/// Open the workbook at `path` (xlsx, xls, xlsb or ods, picked by extension) and
/// read its first worksheet:
/// - the first row becomes the headers, verbatim;
/// - every later row becomes one data row, with fully blank rows skipped.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_first_sheet<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let spreadsheet_err = |source| MetadataError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MetadataError::EmptyWorkbook(path.to_path_buf()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(spreadsheet_err)?;
    let (row_count, col_count) = range.get_size();
    debug!(sheet = %sheet_name, row_count, col_count, "opened first sheet");

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(header_text).collect())
        .unwrap_or_default();

    let mut table = RawTable::new(headers);
    let mut skipped = 0usize;
    for row in rows {
        if is_blank_row(row) {
            skipped += 1;
            continue;
        }
        table.rows.push(row.iter().map(cell_text).collect());
    }

    info!(
        sheet = %sheet_name,
        columns = table.headers.len(),
        rows = table.rows.len(),
        skipped,
        "loaded metadata"
    );
    Ok(table)
}

use calamine::{Data, DataType};

/// Text used when a missing cell is stringified ahead of date parsing.
pub const MISSING_TEXT: &str = "nan";

/// 1) Convert a spreadsheet cell into its textual value; empty and error cells are `None`.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(float_text(*f)),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => Some(match cell.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => float_text(dt.as_f64()),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// 2) Header cells keep their text verbatim; an empty header is the empty string.
pub fn header_text(cell: &Data) -> String {
    cell_text(cell).unwrap_or_default()
}

/// Excel stores every number as a float; whole values print without a fraction.
pub fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

pub fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|c| matches!(c, Data::Empty))
}

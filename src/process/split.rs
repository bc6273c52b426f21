use crate::process::raw_table::Record;

pub const LOCATION_COLUMN: &str = "Location";

/// Derived columns, in the order their segments appear in `Location`.
pub const LOCATION_FIELDS: [&str; 4] = ["region", "country", "division", "location"];

/// Split a `region/country/division/location` string into its first four
/// trimmed segments. Positions with no segment stay `None`; segments past the
/// fourth are dropped.
pub fn split_location(raw: Option<&str>) -> [Option<String>; 4] {
    let mut parts: [Option<String>; 4] = Default::default();
    if let Some(raw) = raw {
        for (slot, segment) in parts.iter_mut().zip(raw.split('/')) {
            *slot = Some(segment.trim().to_string());
        }
    }
    parts
}

/// Write the derived location columns onto `record`, overwriting any existing
/// columns of the same name.
pub fn apply_location_split(record: &mut Record) {
    let parts = split_location(record.get(LOCATION_COLUMN));
    for (name, value) in LOCATION_FIELDS.iter().zip(parts) {
        record.insert(*name, value);
    }
}

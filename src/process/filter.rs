use regex::{Regex, RegexBuilder};
use tracing::info;

use crate::error::Result;
use crate::process::raw_table::Record;

pub const PASSAGE_COLUMN: &str = "passage_category";

/// Drops records whose passage category mentions any excluded term,
/// case-insensitively and anywhere in the text. Missing categories never match.
#[derive(Debug, Clone)]
pub struct PassageFilter {
    pattern: Option<Regex>,
}

impl PassageFilter {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self> {
        if terms.is_empty() {
            return Ok(Self { pattern: None });
        }
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn is_excluded(&self, category: Option<&str>) -> bool {
        match (&self.pattern, category) {
            (Some(p), Some(c)) => p.is_match(c),
            _ => false,
        }
    }

    pub fn retain(&self, records: Vec<Record>) -> Vec<Record> {
        let before = records.len();
        let kept: Vec<Record> = records
            .into_iter()
            .filter(|r| !self.is_excluded(r.get(PASSAGE_COLUMN)))
            .collect();
        info!(
            kept = kept.len(),
            dropped = before - kept.len(),
            "filtered passage categories"
        );
        kept
    }
}

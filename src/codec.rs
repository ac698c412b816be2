//! Cookie string codec
//!
//! Converts between the portable `name1=value1; name2=value2` text form and
//! an ordered sequence of [`CookieRecord`]s. The format has no escaping:
//! values may contain `=` but never `;`, and whitespace around pairs and
//! around the first `=` is stripped on parse. `format(parse(s))` therefore
//! only reproduces `s` when names and values hold no `;`, no surrounding
//! whitespace, and (for names) no `=`.

use log::trace;
use serde::Serialize;

const PAIR_SEPARATOR: char = ';';
const JOIN_SEPARATOR: &str = "; ";

/// A validated `name=value` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookieRecord {
    name: String,
    value: String,
}

impl CookieRecord {
    /// Build a record, trimming both halves. Returns `None` when the trimmed
    /// name is empty.
    pub fn new(name: &str, value: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parse a cookie payload into records, in order of appearance.
///
/// Malformed segments (blank, missing `=`, or empty name) are dropped rather
/// than reported, so this never fails; garbage input yields an empty vector.
pub fn parse(text: &str) -> Vec<CookieRecord> {
    text.split(PAIR_SEPARATOR).filter_map(parse_segment).collect()
}

/// Parse one `;`-delimited segment. This is the drop policy for malformed
/// pairs: anything that is not `name=value` with a non-empty name is `None`.
pub fn parse_segment(segment: &str) -> Option<CookieRecord> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    let Some((name, value)) = segment.split_once('=') else {
        trace!("dropping cookie segment without '=': {:?}", segment);
        return None;
    };

    let record = CookieRecord::new(name, value);
    if record.is_none() {
        trace!("dropping cookie segment with empty name: {:?}", segment);
    }
    record
}

/// Render records back into the `name=value; name=value` form.
pub fn format(records: &[CookieRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}={}", r.name, r.value))
        .collect::<Vec<_>>()
        .join(JOIN_SEPARATOR)
}

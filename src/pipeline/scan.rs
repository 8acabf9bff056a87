//! Region scanner (pure, no side effects).
//!
//! A region opens at a line matching the start pattern (that does not also
//! match the end pattern) and closes at the first subsequent line matching
//! the end pattern. Every line is tested, including lines inside another
//! region's span, so overlapping or nested markers each open their own
//! independent forward scan with unspecified resulting boundaries.

use super::ProcessError;
use crate::config::Markers;

/// A delimited region found in a document.
///
/// Constructed once during the scan and never mutated; line indices are
/// 0-based and inclusive on both ends.
#[derive(Debug, Clone)]
pub struct Region {
    /// Full text of the line matching the start pattern
    pub start_line: String,
    /// Asset reference term captured from the start line
    pub term: String,
    /// Lines strictly between start and end (empty if adjacent)
    pub middle: Vec<String>,
    /// Full text of the line matching the end pattern
    pub end_line: String,
    /// Index of the start line
    pub start_index: usize,
    /// Index of the end line
    pub end_index: usize,
}

/// Produce the ordered sequence of regions in document order.
///
/// A start marker with no subsequent end marker is an explicit error; the
/// document must not be substituted from a truncated span.
pub fn scan_regions(lines: &[String], markers: &Markers) -> Result<Vec<Region>, ProcessError> {
    let mut regions = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some(captures) = markers.start.captures(line) else {
            continue;
        };
        if markers.end.is_match(line) {
            continue;
        }

        let term = captures
            .get(1)
            .map_or_else(String::new, |m| m.as_str().to_string());
        regions.push(close_region(lines, markers, index, term)?);
    }

    Ok(regions)
}

/// Forward-scan from the line after `start_index` to the first end match.
fn close_region(
    lines: &[String],
    markers: &Markers,
    start_index: usize,
    term: String,
) -> Result<Region, ProcessError> {
    let mut middle = Vec::new();

    for (offset, line) in lines[start_index + 1..].iter().enumerate() {
        if markers.end.is_match(line) {
            return Ok(Region {
                start_line: lines[start_index].clone(),
                term,
                middle,
                end_line: line.clone(),
                start_index,
                end_index: start_index + 1 + offset,
            });
        }
        middle.push(line.clone());
    }

    Err(ProcessError::Unterminated {
        line: start_index + 1,
    })
}

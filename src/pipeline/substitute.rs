//! Line-range-keyed substitution.
//!
//! Replacements are indexed by the region's start line recorded at scan
//! time, never by searching the joined text for the span. Byte-identical
//! spans and lookup completion order therefore cannot misplace a
//! replacement, and every line outside a region is emitted unchanged.

use rustc_hash::FxHashMap;

use super::{LINE_SEPARATOR, Replacement};

/// Produce the final document text.
///
/// Each replaced span becomes `[start line, markup, end line]`; the
/// replacement order given by the caller is irrelevant.
pub fn substitute(lines: &[String], replacements: &[Replacement]) -> String {
    let by_start: FxHashMap<usize, &Replacement> = replacements
        .iter()
        .map(|r| (r.region.start_index, r))
        .collect();

    let mut output: Vec<&str> = Vec::with_capacity(lines.len());
    let mut index = 0;
    while index < lines.len() {
        match by_start.get(&index) {
            Some(replacement) => {
                output.push(&replacement.region.start_line);
                output.push(&replacement.markup);
                output.push(&replacement.region.end_line);
                index = replacement.region.end_index + 1;
            }
            None => {
                output.push(&lines[index]);
                index += 1;
            }
        }
    }

    output.join(LINE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Markers;
    use crate::pipeline::scan_regions;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn replacements_for(doc: &[String], markups: &[&str]) -> Vec<Replacement> {
        let regions = scan_regions(doc, &Markers::default()).unwrap();
        regions
            .into_iter()
            .zip(markups)
            .map(|(region, markup)| Replacement {
                region,
                markup: markup.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_span_collapses_to_three_lines() {
        let doc = lines(&[
            "before",
            "<!-- taskkit:app.js -->",
            "old line one",
            "old line two",
            "<!-- taskkit:end -->",
            "after",
        ]);
        let replacements = replacements_for(&doc, &["NEW"]);

        let result = substitute(&doc, &replacements);
        let expected = [
            "before",
            "<!-- taskkit:app.js -->",
            "NEW",
            "<!-- taskkit:end -->",
            "after",
        ]
        .join(LINE_SEPARATOR);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_replacement_order_does_not_matter() {
        let doc = lines(&[
            "<!-- taskkit:a.js -->",
            "<!-- taskkit:end -->",
            "mid",
            "<!-- taskkit:b.js -->",
            "<!-- taskkit:end -->",
        ]);
        let mut replacements = replacements_for(&doc, &["A", "B"]);
        replacements.reverse(); // simulate out-of-order lookup completion

        let result = substitute(&doc, &replacements);
        let expected = [
            "<!-- taskkit:a.js -->",
            "A",
            "<!-- taskkit:end -->",
            "mid",
            "<!-- taskkit:b.js -->",
            "B",
            "<!-- taskkit:end -->",
        ]
        .join(LINE_SEPARATOR);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_identical_spans_both_replaced() {
        // Two byte-identical spans; text-search replacement would hit the
        // first span twice, line ranges hit each exactly once
        let doc = lines(&[
            "<!-- taskkit:app.js -->",
            "old",
            "<!-- taskkit:end -->",
            "<!-- taskkit:app.js -->",
            "old",
            "<!-- taskkit:end -->",
        ]);
        let replacements = replacements_for(&doc, &["FIRST", "SECOND"]);

        let result = substitute(&doc, &replacements);
        let expected = [
            "<!-- taskkit:app.js -->",
            "FIRST",
            "<!-- taskkit:end -->",
            "<!-- taskkit:app.js -->",
            "SECOND",
            "<!-- taskkit:end -->",
        ]
        .join(LINE_SEPARATOR);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_no_replacements_rejoins_lines() {
        let doc = lines(&["a", "", "b"]);
        assert_eq!(substitute(&doc, &[]), ["a", "", "b"].join(LINE_SEPARATOR));
    }
}

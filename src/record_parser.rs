/*!
 * Record parsing for newline-delimited JSON batches.
 *
 * A batch blob is UTF-8 text with one JSON record per line. The parser splits
 * on line feeds, drops empty lines, and decodes every remaining line. A line
 * that is not a valid record is preserved as a `Malformed` marker so the
 * orchestrator can isolate the failure to that line instead of aborting the
 * whole batch.
 */

use serde::Deserialize;

/// One raw input record, as declared by the upstream producer.
///
/// Extra fields on the line are accepted and ignored. The three fields below
/// are required; a line missing any of them is structurally invalid.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawRecord {
    /// Opaque identifier, correlates derived output records to their source
    pub id: String,

    /// Original text of the record
    pub text: String,

    /// Declared language code of the text
    pub lang: String,
}

/// Outcome of decoding one non-empty input line
#[derive(Debug)]
pub enum ParsedLine {
    /// The line decoded into a record
    Record {
        /// 1-based position of the line in the blob
        line_no: usize,
        /// The decoded record
        record: RawRecord,
    },

    /// The line was not a structurally valid record
    Malformed {
        /// 1-based position of the line in the blob
        line_no: usize,
        /// The raw line, kept for diagnostics
        raw: String,
        /// Why decoding failed
        reason: String,
    },
}

impl ParsedLine {
    /// 1-based line number this entry came from
    pub fn line_no(&self) -> usize {
        match self {
            ParsedLine::Record { line_no, .. } => *line_no,
            ParsedLine::Malformed { line_no, .. } => *line_no,
        }
    }

    /// The raw text to show in diagnostics for this line
    pub fn raw_for_diagnostics(&self) -> String {
        match self {
            ParsedLine::Record { record, .. } => record.text.clone(),
            ParsedLine::Malformed { raw, .. } => raw.clone(),
        }
    }
}

/// Split a batch blob into parsed lines, preserving input order.
///
/// Empty lines are dropped and never show up in the output; every returned
/// entry corresponds to one non-empty input line, so the length of the result
/// is the batch's attempted-record count.
pub fn parse_records(blob: &str) -> Vec<ParsedLine> {
    blob.split('\n')
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| {
            let line_no = idx + 1;
            match serde_json::from_str::<RawRecord>(line) {
                Ok(record) => ParsedLine::Record { line_no, record },
                Err(e) => ParsedLine::Malformed {
                    line_no,
                    raw: line.to_string(),
                    reason: e.to_string(),
                },
            }
        })
        .collect()
}

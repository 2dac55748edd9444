//! CSV payload encoding
//!
//! The import executor consumes RFC 4180 CSV. Encoding goes through the
//! `csv` writer so cells holding commas, quotes or line breaks come back
//! intact on decode.

use crate::domain::ids::WorksheetId;
use crate::domain::{Result, Row, SyncError};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use uuid::Uuid;

/// Length of the random suffix in generated payload file names
const FILE_SUFFIX_LEN: usize = 10;

/// Encode a header and data rows as CSV text
///
/// The header is written first, rows follow in input order. Lines end with
/// `\n`; fields are quoted only when needed and embedded quotes are doubled.
/// An empty header with no rows encodes to an empty string.
///
/// # Examples
///
/// ```
/// use sheetsync::core::payload::encode_payload;
///
/// let header = vec!["Name".to_string(), "Note".to_string()];
/// let rows = vec![vec!["Alice, Bob".to_string(), "say \"hi\"".to_string()]];
///
/// let text = encode_payload(&header, &rows).unwrap();
/// assert_eq!(text, "Name,Note\n\"Alice, Bob\",\"say \"\"hi\"\"\"\n");
/// ```
pub fn encode_payload(header: &[String], rows: &[Row]) -> Result<String> {
    if header.is_empty() && rows.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| SyncError::Serialization(format!("Failed to finish CSV payload: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|e| SyncError::Serialization(format!("CSV payload is not UTF-8: {e}")))
}

/// Decode CSV text into rows, header included
///
/// Accepts `\n` and `\r\n` line endings and rows of differing lengths.
pub fn decode_payload(text: &str) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

/// Build the payload file name for a worksheet import
///
/// Format: `"{display_name}-worksheet-{worksheet_id}-{suffix}.csv"`
pub fn payload_file_name(display_name: &str, worksheet_id: WorksheetId, suffix: &str) -> String {
    format!("{display_name}-worksheet-{worksheet_id}-{suffix}.csv")
}

/// Short random suffix that keeps payload file names unique
pub fn random_suffix() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(FILE_SUFFIX_LEN)
        .collect()
}

//! Row-delta extraction
//!
//! Given the full contents of a worksheet and the mapping's row counter,
//! determines which data rows have not been imported yet. Row 0 is always the
//! header; the counter counts data rows only.

use crate::domain::Row;

/// Header plus the data rows not yet imported
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowDelta {
    /// Header row (empty when the worksheet is empty)
    pub header: Row,

    /// Unimported data rows, in worksheet order
    pub rows: Vec<Row>,

    /// Data-row index (0-based, header excluded) of the first row in `rows`
    pub start: u64,
}

impl RowDelta {
    /// Whether there is nothing to import
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of data rows in the delta
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Data-row index one past the last row in the delta
    pub fn end(&self) -> u64 {
        self.start + self.rows.len() as u64
    }
}

/// Extract the unimported slice of a worksheet
///
/// - `reset_on_import` returns every data row and ignores `counter`.
/// - Otherwise the first `counter` data rows are skipped.
/// - A counter at or past the end yields an empty delta.
/// - An empty worksheet yields an empty header and an empty delta.
///
/// # Examples
///
/// ```
/// use sheetsync::core::extract::extract_delta;
///
/// let rows = vec![
///     vec!["Name".to_string()],
///     vec!["Alice".to_string()],
///     vec!["Bob".to_string()],
/// ];
///
/// let delta = extract_delta(rows, 1, false);
/// assert_eq!(delta.header, vec!["Name".to_string()]);
/// assert_eq!(delta.rows, vec![vec!["Bob".to_string()]]);
/// assert_eq!(delta.start, 1);
/// ```
pub fn extract_delta(full_rows: Vec<Row>, counter: u64, reset_on_import: bool) -> RowDelta {
    let mut rows = full_rows.into_iter();

    let Some(header) = rows.next() else {
        return RowDelta::default();
    };

    let data: Vec<Row> = rows.collect();
    let skip = if reset_on_import {
        0
    } else {
        usize::try_from(counter).unwrap_or(usize::MAX).min(data.len())
    };

    RowDelta {
        header,
        rows: data.into_iter().skip(skip).collect(),
        start: skip as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sheet(data_rows: usize) -> Vec<Row> {
        let mut rows = vec![row(&["Name", "Email"])];
        for i in 0..data_rows {
            rows.push(row(&[&format!("user{i}"), &format!("user{i}@example.com")]));
        }
        rows
    }

    #[test_case(5, 0 => 5 ; "nothing imported yet")]
    #[test_case(5, 2 => 3 ; "partially imported")]
    #[test_case(5, 5 => 0 ; "fully imported")]
    #[test_case(2, 3 => 0 ; "counter past the end")]
    #[test_case(0, 0 => 0 ; "header only")]
    fn test_delta_size_without_reset(data_rows: usize, counter: u64) -> usize {
        extract_delta(sheet(data_rows), counter, false).len()
    }

    #[test_case(3, 0 ; "counter zero")]
    #[test_case(3, 2 ; "counter inside")]
    #[test_case(3, 10 ; "counter past the end")]
    fn test_reset_returns_all_rows(data_rows: usize, counter: u64) {
        let delta = extract_delta(sheet(data_rows), counter, true);
        assert_eq!(delta.len(), data_rows);
        assert_eq!(delta.start, 0);
    }

    #[test]
    fn test_delta_is_the_suffix_from_counter() {
        let full = sheet(4);
        let delta = extract_delta(full.clone(), 1, false);

        assert_eq!(delta.header, full[0]);
        assert_eq!(delta.rows, full[2..].to_vec());
        assert_eq!(delta.start, 1);
        assert_eq!(delta.end(), 4);
    }

    #[test]
    fn test_skips_already_imported_rows() {
        let full = vec![
            row(&["Name", "Email"]),
            row(&["Alice", "alice@example.com"]),
            row(&["Bob", "bob@example.com"]),
            row(&["Charlie", "charlie@example.com"]),
        ];

        let delta = extract_delta(full, 1, false);
        assert_eq!(
            delta.rows,
            vec![
                row(&["Bob", "bob@example.com"]),
                row(&["Charlie", "charlie@example.com"]),
            ]
        );
    }

    #[test]
    fn test_header_survives_when_everything_is_imported() {
        let delta = extract_delta(sheet(2), 3, false);
        assert_eq!(delta.header, row(&["Name", "Email"]));
        assert!(delta.is_empty());
        assert_eq!(delta.start, 2);
    }

    #[test]
    fn test_empty_source() {
        let delta = extract_delta(Vec::new(), 4, false);
        assert!(delta.header.is_empty());
        assert!(delta.is_empty());

        let delta = extract_delta(Vec::new(), 0, true);
        assert!(delta.header.is_empty());
        assert!(delta.is_empty());
    }
}

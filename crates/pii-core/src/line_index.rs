//! Byte offset to `(row, column)` mapping for reporting findings

/// Sorted start offsets of every line in a piece of content.
///
/// Line starts are offset 0 plus every offset directly after a `\n`,
/// so a trailing newline opens an (empty) final line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .iter()
                .enumerate()
                .filter(|(_, b)| **b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Map a byte offset to a 1-based row and 0-based byte column.
    ///
    /// Offsets past the end of the content land on the last line.
    pub fn row_col(&self, offset: usize) -> Option<(usize, usize)> {
        let row = self.line_starts.partition_point(|&start| start <= offset);
        if row == 0 {
            return None;
        }
        Some((row, offset - self.line_starts[row - 1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let index = LineIndex::new(b"email me at a@b.com");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.row_col(0), Some((1, 0)));
        assert_eq!(index.row_col(12), Some((1, 12)));
    }

    #[test]
    fn test_after_newlines() {
        let content = b"first\nsecond line\n\nfourth";
        let index = LineIndex::new(content);
        assert_eq!(index.line_count(), 4);
        // 's' of "second"
        assert_eq!(index.row_col(6), Some((2, 0)));
        // the newline itself belongs to the line it ends
        assert_eq!(index.row_col(5), Some((1, 5)));
        assert_eq!(index.row_col(13), Some((2, 7)));
        // empty third line
        assert_eq!(index.row_col(18), Some((3, 0)));
        assert_eq!(index.row_col(19), Some((4, 0)));
        assert_eq!(index.row_col(22), Some((4, 3)));
    }

    #[test]
    fn test_crlf_counts_carriage_return_in_column() {
        let index = LineIndex::new(b"a\r\nbc");
        assert_eq!(index.row_col(1), Some((1, 1)));
        assert_eq!(index.row_col(4), Some((2, 1)));
    }

    #[test]
    fn test_trailing_newline_and_past_end() {
        let index = LineIndex::new(b"one\ntwo\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.row_col(8), Some((3, 0)));
        assert_eq!(index.row_col(100), Some((3, 92)));
    }

    #[test]
    fn test_empty_content() {
        let index = LineIndex::new(b"");
        assert_eq!(index.row_col(0), Some((1, 0)));
    }
}

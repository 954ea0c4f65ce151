use serde::{Deserialize, Serialize};

/// Sourcecode location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub(crate) row: usize,
    pub(crate) column: usize,
}

impl Location {
    pub fn new(row: usize, column: usize) -> Self {
        Location { row, column }
    }

    /// Current row, 1-based.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Current column, 1-based.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// Byte offsets of every newline in a file, computed once per file and used
/// to turn span offsets into row/column pairs.
#[derive(Debug, Clone)]
pub struct LineIndex {
    new_lines: Vec<usize>,
}

impl LineIndex {
    pub fn new(contents: &str) -> Self {
        let new_lines = contents
            .char_indices()
            .filter(|(_, c)| *c == '\n')
            .map(|(i, _)| i)
            .collect();
        Self { new_lines }
    }

    /// Row/column of a byte offset, both 1-based.
    pub fn location(&self, offset: usize) -> Location {
        let row = self.new_lines.partition_point(|&nl| nl < offset);
        let column = match row {
            0 => offset + 1,
            _ => offset - self.new_lines[row - 1],
        };
        Location::new(row + 1, column)
    }
}

/// Source location information for error reporting
///
/// Line and column numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocation {
    offset: usize,
    line: usize,
    column: usize,
    line_source: String,
}

impl ErrorLocation {
    /// Creates a new error location from source content and a byte offset.
    ///
    /// Offsets past the end of the source are clamped to the end, and offsets
    /// that fall inside a multi-byte character are moved back to the start of
    /// that character.
    #[must_use]
    pub fn from_source_and_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line_start = source[..offset]
            .rfind('\n')
            .map_or(0, |newline_idx| newline_idx + 1);

        let column = source[line_start..offset].chars().count() + 1;
        let line = source[..offset].matches('\n').count() + 1;

        let line_end = source[line_start..]
            .find('\n')
            .map_or(source.len(), |idx| line_start + idx);
        let line_source = source[line_start..line_end].trim_end_matches('\r').to_string();

        Self {
            offset,
            line,
            column,
            line_source,
        }
    }

    /// Returns the byte offset from the beginning of the source
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the line number where the error occurred (1-indexed)
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number where the error occurred (1-indexed)
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Returns the source line where the error occurred
    #[must_use]
    pub fn line_source(&self) -> &str {
        &self.line_source
    }
}

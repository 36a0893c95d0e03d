//! Line bookkeeping over a document snapshot.

pub use text_size::{TextRange, TextSize};

/// Zero-based line and UTF-8 byte column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Line start offsets for one text snapshot.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    text_len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let breaks = bytes.iter().enumerate().filter_map(|(i, &b)| match b {
            b'\n' => Some(i + 1),
            // `\r\n` is broken at the `\n`.
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => Some(i + 1),
            _ => None,
        });

        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(breaks.map(|start| TextSize::from(start as u32)));
        Self {
            line_starts,
            text_len: TextSize::of(text),
        }
    }

    #[inline]
    pub fn text_len(&self) -> TextSize {
        self.text_len
    }

    #[inline]
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    #[inline]
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.line_starts.get(line as usize).copied()
    }

    /// Zero-based line containing `offset`. Offsets past the end clamp to the
    /// last line.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        let offset = offset.min(self.text_len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        line as u32
    }

    fn start_of_line_containing(&self, offset: TextSize) -> TextSize {
        self.line_start(self.line_of(offset))
            .unwrap_or_default()
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.text_len);
        LineCol {
            line: self.line_of(offset),
            col: u32::from(offset - self.start_of_line_containing(offset)),
        }
    }

    /// Leading spaces and tabs of the line containing `offset`.
    ///
    /// `text` must be the snapshot this index was built from.
    pub fn indentation<'a>(&self, text: &'a str, offset: TextSize) -> &'a str {
        let start = u32::from(self.start_of_line_containing(offset)) as usize;
        let line = text.get(start..).unwrap_or_default();
        let width = line
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(line.len());
        &line[..width]
    }
}

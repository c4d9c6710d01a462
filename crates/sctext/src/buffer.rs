//! Append-only text sink for SCs output.

use std::fmt;

/// Indentation unit written once per nesting level.
pub const INDENT: char = '\t';

/// Append-only SCs text buffer.
///
/// Implements [`fmt::Write`], so lines are written with `write!`/`writeln!`
/// after emitting the indentation for the current depth:
///
/// ```
/// use std::fmt::Write;
///
/// use sctext::buffer::ScsBuffer;
///
/// let mut buffer = ScsBuffer::new();
/// writeln!(buffer.tabs(0), "apple").unwrap();
/// writeln!(buffer.tabs(1), "<- sc_node;;").unwrap();
///
/// assert_eq!(buffer.as_str(), "apple\n\t<- sc_node;;\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScsBuffer {
    text: String,
}

impl ScsBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `depth` indentation units and returns the buffer for chaining.
    pub fn tabs(&mut self, depth: usize) -> &mut Self {
        self.text.extend(std::iter::repeat_n(INDENT, depth));
        self
    }

    /// Appends raw text.
    pub fn push_str(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of lines written so far.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

impl fmt::Write for ScsBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}

impl fmt::Display for ScsBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

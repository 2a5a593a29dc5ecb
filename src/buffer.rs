//! Read-only view of a text buffer, as supplied by the host.

/// A buffer the scanner can read line by line.
pub trait TextBuffer {
    fn line_count(&self) -> usize;

    /// Raw text of a line, without its line terminator.
    fn line_text(&self, index: usize) -> &str;

    fn is_empty_or_whitespace(&self, index: usize) -> bool {
        self.line_text(index).trim().is_empty()
    }
}

/// An owned buffer built from file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split text into lines. Handles `\n` and `\r\n` endings and drops a
    /// leading byte-order mark.
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl TextBuffer for Document {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

impl<S: AsRef<str>> TextBuffer for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, index: usize) -> &str {
        self[index].as_ref()
    }
}

impl<S: AsRef<str>> TextBuffer for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, index: usize) -> &str {
        self[index].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text() {
        let doc = Document::from_text("fn main() {\r\n    \n}\n");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_text(0), "fn main() {");
        assert!(doc.is_empty_or_whitespace(1));
        assert!(!doc.is_empty_or_whitespace(2));
    }

    #[test]
    fn test_document_strips_byte_order_mark() {
        let doc = Document::from_text("\u{FEFF}// header\nfn main() {}\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_text(0), "// header");

        // only a leading mark is dropped
        let doc = Document::from_text("a\n\u{FEFF}b\n");
        assert_eq!(doc.line_text(1), "\u{FEFF}b");
    }

    #[test]
    fn test_document_from_lines() {
        let doc = Document::from_lines(vec!["one", "   "]);
        assert_eq!(doc.lines(), &["one".to_string(), "   ".to_string()]);
        assert!(doc.is_empty_or_whitespace(1));
    }

    #[test]
    fn test_slice_buffer() {
        let lines = ["a", "  ", ""];
        let buffer: &[&str] = &lines;
        assert_eq!(buffer.line_count(), 3);
        assert!(buffer.is_empty_or_whitespace(1));
        assert!(buffer.is_empty_or_whitespace(2));
    }
}

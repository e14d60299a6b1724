//! Output document buffer.

use std::fmt;

/// Accumulated output lines: header, one block per input line, footer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    lines: Vec<String>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Final text, one line per entry, newline-terminated
    pub fn into_text(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OutputDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_newline_terminated() {
        let mut doc = OutputDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.clone().into_text(), "");

        doc.push("G90");
        doc.extend(["G20", "M02"]);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.into_text(), "G90\nG20\nM02\n");
    }
}

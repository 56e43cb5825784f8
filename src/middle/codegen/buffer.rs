//! 输出缓冲区
//!
//! Line-oriented text buffer with two-space indentation.

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct CodeBuffer {
    text: String,
    level: usize,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer whose lines start at `level`
    pub fn with_level(level: usize) -> Self {
        Self {
            text: String::new(),
            level,
        }
    }

    /// Write one indented line
    pub fn line(
        &mut self,
        line: impl AsRef<str>,
    ) {
        for _ in 0..self.level {
            self.text.push_str(INDENT);
        }
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Indentation prefix for the current level
    pub fn prefix(&self) -> String {
        INDENT.repeat(self.level)
    }

    pub fn finish(self) -> String {
        self.text
    }
}

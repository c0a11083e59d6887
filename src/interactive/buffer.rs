use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid line range '{0}': expected <line> or <start>-<end>, counting from 1")]
    Invalid(String),
}

/// A 1-based, inclusive range of buffer lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self, SelectionError> {
        if start == 0 || end < start {
            return Err(SelectionError::Invalid(format!("{start}-{end}")));
        }
        Ok(Self { start, end })
    }
}

impl FromStr for LineRange {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SelectionError::Invalid(s.to_string());
        let parse = |part: &str| part.trim().parse::<usize>().map_err(|_| invalid());

        match s.split_once('-') {
            Some((start, end)) => Self::new(parse(start)?, parse(end)?).map_err(|_| invalid()),
            None => {
                let line = parse(s)?;
                Self::new(line, line).map_err(|_| invalid())
            }
        }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// The source text being edited in an interactive session.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Appends `line` on a new line.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Text covered by `range`, or `None` if the range runs past the end.
    pub fn selection(&self, range: LineRange) -> Option<&str> {
        let mut offset = 0;
        let mut start_byte = None;

        for (index, line) in self.text.split_inclusive('\n').enumerate() {
            let number = index + 1;
            if number == range.start {
                start_byte = Some(offset);
            }
            offset += line.len();
            if number == range.end {
                let selected = &self.text[start_byte?..offset];
                return Some(selected.trim_end_matches('\n'));
            }
        }

        None
    }
}

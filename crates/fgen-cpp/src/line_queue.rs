//! Pending lines awaiting dispatch

use std::collections::VecDeque;

/// A preprocessed line tagged with its 1-based number in the original file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Lines are consumed from the front; remainders and merged lines go back
/// to the front so they are seen before anything later in the file.
#[derive(Debug, Default)]
pub(crate) struct LineQueue {
    lines: VecDeque<SourceLine>,
}

impl LineQueue {
    pub(crate) fn pop_front(&mut self) -> Option<SourceLine> {
        self.lines.pop_front()
    }

    pub(crate) fn push_front(&mut self, line: SourceLine) {
        self.lines.push_front(line);
    }

    /// Requeue the trimmed tail of a line unless nothing is left of it
    pub(crate) fn requeue(&mut self, number: usize, remainder: &str) -> bool {
        let remainder = remainder.trim();
        if remainder.is_empty() {
            return false;
        }
        self.push_front(SourceLine::new(number, remainder));
        true
    }

    /// Join `text` with the next pending line and put the result back in front
    ///
    /// Returns `false`, leaving the queue untouched, when no line is left.
    pub(crate) fn merge_with_next(&mut self, number: usize, text: &str) -> bool {
        match self.lines.pop_front() {
            Some(next) => {
                let merged = format!("{} {}", text, next.text);
                self.push_front(SourceLine::new(number, merged.trim()));
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }
}

impl From<Vec<SourceLine>> for LineQueue {
    fn from(lines: Vec<SourceLine>) -> Self {
        Self {
            lines: lines.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(lines: &[(usize, &str)]) -> LineQueue {
        lines
            .iter()
            .map(|(n, t)| SourceLine::new(*n, *t))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_requeue_goes_to_front() {
        let mut q = queue(&[(1, "a"), (2, "b")]);
        let first = q.pop_front().unwrap();
        assert!(q.requeue(first.number, "  rest  "));
        assert_eq!(q.pop_front(), Some(SourceLine::new(1, "rest")));
        assert_eq!(q.pop_front(), Some(SourceLine::new(2, "b")));
    }

    #[test]
    fn test_requeue_ignores_blank_remainder() {
        let mut q = queue(&[(1, "a")]);
        assert!(!q.requeue(1, "   "));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_merge_keeps_first_line_number() {
        let mut q = queue(&[(3, "template <typename T>"), (4, "void f();")]);
        let first = q.pop_front().unwrap();
        assert!(q.merge_with_next(first.number, &first.text));
        assert_eq!(
            q.pop_front(),
            Some(SourceLine::new(3, "template <typename T> void f();"))
        );
        assert!(!q.merge_with_next(3, "dangling"));
    }
}

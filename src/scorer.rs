use itertools::{EitherOrBoth, Itertools};

/// Highlight state of a single reference character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Untyped,
    Correct,
    Incorrect,
    Current,
}

/// Result of comparing the typed text against the reference text.
///
/// `statuses` has exactly one entry per reference char. Typed chars past the
/// end of the reference have no status of their own; they only count as
/// errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub correct_chars: usize,
    pub errors: usize,
    pub statuses: Vec<CharStatus>,
    pub cursor: Option<usize>,
}

/// Compare `typed` against `reference` position by position.
pub fn score(typed: &str, reference: &str) -> Score {
    let mut out = Score::default();
    let mut typed_len = 0;

    for pair in reference.chars().zip_longest(typed.chars()) {
        match pair {
            EitherOrBoth::Both(expected, actual) => {
                typed_len += 1;
                if expected == actual {
                    out.correct_chars += 1;
                    out.statuses.push(CharStatus::Correct);
                } else {
                    out.errors += 1;
                    out.statuses.push(CharStatus::Incorrect);
                }
            }
            EitherOrBoth::Left(_) => out.statuses.push(CharStatus::Untyped),
            EitherOrBoth::Right(_) => {
                typed_len += 1;
                out.errors += 1;
            }
        }
    }

    out.cursor = out
        .statuses
        .len()
        .checked_sub(1)
        .map(|last| typed_len.min(last));

    if let Some(pos) = out.cursor {
        if out.statuses[pos] == CharStatus::Untyped {
            out.statuses[pos] = CharStatus::Current;
        }
    }

    out
}

/// Tracks the cumulative number of characters ever added to the input.
///
/// Deletions shrink the input but never decrement the count, so retyped
/// characters are counted again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    typed_chars: usize,
    last_len: usize,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest input value. Returns the number of chars added.
    pub fn observe(&mut self, typed: &str) -> usize {
        let len = typed.chars().count();
        let added = len.saturating_sub(self.last_len);
        self.typed_chars += added;
        self.last_len = len;
        added
    }

    pub fn typed_chars(&self) -> usize {
        self.typed_chars
    }
}

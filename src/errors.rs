use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Error type representing the failures that can occur while loading or querying tags.
///
/// Each variant is a distinct condition so callers can tell an unreadable source apart
/// from a bad record or a bad query.
#[derive(Debug, Error)]
pub enum TagError {
    /// The tag source could not be opened or read. No partial index is produced.
    #[error("Could not read tag source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data line does not carry a usable tag field.
    ///
    /// `line` is the 1-based line number in the source, the header being line 1.
    #[error("Malformed record on line {line}: {defect}")]
    MalformedRecord { line: usize, defect: RecordDefect },

    /// Text supplied for a count lookup is not an integer.
    #[error("Invalid count {input:?}: {source}")]
    InvalidQueryInput {
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// Reading a command or writing a reply on the interactive streams failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// What is wrong with a single data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordDefect {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),

    #[error("tag field is empty")]
    EmptyTag,
}

use std::io::{BufRead, Write};

use log::debug;

use crate::errors::TagError;
use crate::leaderboard::Leaderboard;
use crate::ranked_index::RankedIndex;
use crate::traits::FoldCase;

const COMMAND_PROMPT: &str = "Search by Tag or Tag Count? (Enter T or C... or EXIT to exit): ";
const TAG_PROMPT: &str = "Tag to search for: ";
const COUNT_PROMPT: &str = "Count to search for: ";

/// A request typed at the command prompt. Matching ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    SearchByTag,
    SearchByCount,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Command {
        if input.matches_ignore_case("EXIT") {
            Command::Exit
        } else if input.matches_ignore_case("T") {
            Command::SearchByTag
        } else if input.matches_ignore_case("C") {
            Command::SearchByCount
        } else {
            Command::Unknown(input.to_string())
        }
    }
}

/// Parses the text typed for a count lookup.
///
/// Surrounding whitespace is ignored. Negative numbers are valid input; they just never
/// match a tag.
pub fn parse_count(input: &str) -> Result<i64, TagError> {
    input
        .trim()
        .parse()
        .map_err(|source| TagError::InvalidQueryInput {
            input: input.to_string(),
            source,
        })
}

/// Interactive query loop over a [`RankedIndex`].
///
/// Reads one request per line from `input` and writes prompts and answers to `output`.
/// The session ends on `EXIT` or when `input` is exhausted.
pub struct Session<'a, R, W> {
    index: &'a RankedIndex,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(index: &'a RankedIndex, input: R, output: W) -> Self {
        Self {
            index,
            input,
            output,
        }
    }

    pub fn print_leaderboard(&mut self, size: usize) -> Result<(), TagError> {
        write!(self.output, "{}", Leaderboard::new(self.index, size))?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), TagError> {
        loop {
            let Some(line) = self.prompt(COMMAND_PROMPT)? else {
                debug!("Input closed, ending session");
                return Ok(());
            };

            match Command::parse(&line) {
                Command::Exit => {
                    writeln!(self.output, "Bye!")?;
                    return Ok(());
                }
                Command::SearchByTag => self.search_by_tag()?,
                Command::SearchByCount => self.search_by_count()?,
                Command::Unknown(command) => {
                    writeln!(self.output, "Invalid command: {}", command)?;
                }
            }
        }
    }

    /// Hands back the underlying streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn search_by_tag(&mut self) -> Result<(), TagError> {
        let Some(tag) = self.prompt(TAG_PROMPT)? else {
            return Ok(());
        };

        match self.index.lookup_by_tag(&tag) {
            Some(count) => writeln!(self.output, "Tag \"{}\" occurred {} times.", tag, count)?,
            None => writeln!(self.output, "Tag \"{}\" does not exist.", tag)?,
        }
        Ok(())
    }

    fn search_by_count(&mut self) -> Result<(), TagError> {
        let Some(input) = self.prompt(COUNT_PROMPT)? else {
            return Ok(());
        };

        let count = match parse_count(&input) {
            Ok(count) => count,
            Err(e) => {
                debug!("{}", e);
                writeln!(self.output, "Is {} even a number? C'mon, man!", input)?;
                return Ok(());
            }
        };

        writeln!(self.output, "Tags with {} occurrences:", count)?;
        let index = self.index;
        let tags = u64::try_from(count)
            .map(|count| index.lookup_by_count(count))
            .unwrap_or_default();
        if tags.is_empty() {
            writeln!(self.output, "No tags with {} occurrences found.", count)?;
        }
        for tag in tags {
            writeln!(self.output, "* {}", tag)?;
        }
        Ok(())
    }

    /// Writes `text` and reads one line without its line ending, `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, TagError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(|c| c == '\n' || c == '\r');
        Ok(Some(trimmed.to_string()))
    }
}

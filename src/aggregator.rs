use std::collections::hash_map::{self, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use clap::ValueEnum;
use indicatif::{ParallelProgressIterator, ProgressBar};
use log::{debug, warn};
use rayon::prelude::*;

use crate::errors::{RecordDefect, TagError};

/// Character separating the fields of a record.
pub const FIELD_SEPARATOR: char = ',';

/// 0-based position of the tag within a record.
pub const TAG_FIELD: usize = 2;

pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// How the aggregation pass treats a data line without a usable tag field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MalformedPolicy {
    /// Log the line, record it in [`FrequencyTable::skipped`] and keep counting.
    #[default]
    Skip,
    /// Stop at the first such line and return [`TagError::MalformedRecord`].
    Abort,
}

/// A data line left out of the counts under [`MalformedPolicy::Skip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRecord {
    pub line: usize,
    pub defect: RecordDefect,
}

/// Occurrence count per distinct tag, compared exactly (case-sensitive).
///
/// The table has no iteration order of its own; ordering is established by
/// [`RankedIndex`](crate::ranked_index::RankedIndex).
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    records: u64,
    skipped: Vec<SkippedRecord>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more record carrying `tag`, starting unseen tags at 1.
    pub fn increment(&mut self, tag: &str) {
        match self.counts.get_mut(tag) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(tag.to_owned(), 1);
            }
        }
        self.records += 1;
    }

    pub fn get(&self, tag: &str) -> Option<u64> {
        self.counts.get(tag).copied()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of data lines that contributed to a count.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Lines left out of the counts, in source order.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    /// Adds every count of `other` into this table.
    ///
    /// Counting is a per-tag sum, so merging partial tables in any order gives the same
    /// counts. Skipped records are appended, so merge in source order to keep them sorted.
    pub fn merge(&mut self, other: FrequencyTable) {
        for (tag, count) in other.counts {
            *self.counts.entry(tag).or_insert(0) += count;
        }
        self.records += other.records;
        self.skipped.extend(other.skipped);
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Returns the tag field of a data line.
///
/// Fields are split on every separator, so a trailing separator yields an empty last
/// field rather than being dropped.
///
/// # Examples
///
/// ```
/// use movie_tags::aggregator::extract_tag;
/// use movie_tags::errors::RecordDefect;
///
/// assert_eq!(extract_tag("1,296,drama,1147880044"), Ok("drama"));
/// assert_eq!(extract_tag("1,296,drama,"), Ok("drama"));
/// assert_eq!(extract_tag("1,296"), Err(RecordDefect::TooFewFields(2)));
/// assert_eq!(extract_tag("1,296,,"), Err(RecordDefect::EmptyTag));
/// ```
pub fn extract_tag(line: &str) -> Result<&str, RecordDefect> {
    match line.split(FIELD_SEPARATOR).nth(TAG_FIELD) {
        Some("") => Err(RecordDefect::EmptyTag),
        Some(tag) => Ok(tag),
        None => Err(RecordDefect::TooFewFields(
            line.split(FIELD_SEPARATOR).count(),
        )),
    }
}

/// Builds a [`FrequencyTable`] from raw record lines.
///
/// The first line is a header and is discarded without being parsed.
#[derive(Debug, Clone)]
pub struct Aggregator {
    policy: MalformedPolicy,
    batch_size: usize,
    progress: ProgressBar,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            policy: MalformedPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            progress: ProgressBar::hidden(),
        }
    }
}

impl Aggregator {
    pub fn new(policy: MalformedPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Sets how many data lines one worker counts at a time in [`Aggregator::build_parallel`].
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Reports batches completed by [`Aggregator::build_parallel`] on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Counts tags in a single sequential pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use movie_tags::aggregator::{Aggregator, MalformedPolicy};
    ///
    /// let lines = ["userId,movieId,tag,timestamp", "1,2,drama,0", "3,4,drama,0", "5,6,comedy,0"];
    /// let table = Aggregator::new(MalformedPolicy::Abort).build(lines).unwrap();
    /// assert_eq!(table.get("drama"), Some(2));
    /// assert_eq!(table.get("comedy"), Some(1));
    /// assert_eq!(table.get("Drama"), None);
    /// ```
    pub fn build<I, S>(&self, lines: I) -> Result<FrequencyTable, TagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = FrequencyTable::new();
        for (idx, line) in lines.into_iter().enumerate().skip(1) {
            self.tally(&mut table, idx + 1, line.as_ref())?;
        }
        Ok(table)
    }

    /// Counts tags in batches on the rayon pool and sums the partial tables.
    ///
    /// Gives the same table as [`Aggregator::build`]. Partial tables are merged in source
    /// order, so skipped records stay sorted and [`MalformedPolicy::Abort`] reports the
    /// first malformed line of the file.
    pub fn build_parallel<S>(&self, lines: &[S]) -> Result<FrequencyTable, TagError>
    where
        S: AsRef<str> + Sync,
    {
        let data = lines.get(1..).unwrap_or(&[]);
        self.progress
            .set_length(data.len().div_ceil(self.batch_size) as u64);

        let partials: Vec<Result<FrequencyTable, TagError>> = data
            .par_chunks(self.batch_size)
            .enumerate()
            .progress_with(self.progress.clone())
            .map(|(batch, chunk)| -> Result<FrequencyTable, TagError> {
                // header is line 1, the first data line is line 2
                let first_line = batch * self.batch_size + 2;
                let mut table = FrequencyTable::new();
                for (offset, line) in chunk.iter().enumerate() {
                    self.tally(&mut table, first_line + offset, line.as_ref())?;
                }
                Ok(table)
            })
            .collect();

        let mut table = FrequencyTable::new();
        for partial in partials {
            table.merge(partial?);
        }
        self.progress.finish_and_clear();
        Ok(table)
    }

    /// Reads every line of the file at `path` and counts its tags.
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD` and the line is counted
    /// like any other.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::SourceUnavailable`] if the file cannot be opened or reading it
    /// fails, and [`TagError::MalformedRecord`] under [`MalformedPolicy::Abort`].
    pub fn load(&self, path: &Path) -> Result<FrequencyTable, TagError> {
        let unavailable = |source: io::Error| TagError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unavailable)?;
        let lines = read_lines_lossy(BufReader::new(file)).map_err(unavailable)?;
        debug!("Read {} lines from {}", lines.len(), path.display());

        self.build_parallel(&lines)
    }

    fn tally(&self, table: &mut FrequencyTable, line: usize, text: &str) -> Result<(), TagError> {
        match extract_tag(text) {
            Ok(tag) => table.increment(tag),
            Err(defect) => match self.policy {
                MalformedPolicy::Skip => {
                    warn!("Skipping line {}: {}", line, defect);
                    table.skipped.push(SkippedRecord { line, defect });
                }
                MalformedPolicy::Abort => {
                    return Err(TagError::MalformedRecord { line, defect });
                }
            },
        }
        Ok(())
    }
}

/// Splits `reader` into lines without their `\n` or `\r\n` ending, decoding each one lossily.
fn read_lines_lossy<R: BufRead>(mut reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(lines);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
}

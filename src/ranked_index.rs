use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::aggregator::FrequencyTable;
use crate::traits::FoldCase;

/// One distinct tag and the number of records carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagEntry {
    pub tag: String,
    pub count: u64,
}

impl TagEntry {
    pub fn new(tag: impl Into<String>, count: u64) -> Self {
        Self {
            tag: tag.into(),
            count,
        }
    }
}

impl Ord for TagEntry {
    /// Higher counts first, then tags in ascending byte order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.tag.cmp(&other.tag))
    }
}

impl PartialOrd for TagEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TagEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.count, self.tag)
    }
}

/// Tags ordered by count descending, then tag ascending.
///
/// Built once from a [`FrequencyTable`] and read-only afterwards. Since every tag is
/// distinct the order has no ties.
///
/// # Examples
///
/// ```
/// use movie_tags::aggregator::Aggregator;
/// use movie_tags::ranked_index::{RankedIndex, TagEntry};
///
/// let lines = ["header", "1,1,drama,0", "1,2,comedy,0", "1,3,drama,0", "1,4,action,0"];
/// let index = RankedIndex::from_table(Aggregator::default().build(lines).unwrap());
///
/// assert_eq!(index.top_n(1), [TagEntry::new("drama", 2)]);
/// assert_eq!(index.lookup_by_tag("DRAMA"), Some(2));
/// assert_eq!(index.lookup_by_count(1), ["action", "comedy"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RankedIndex {
    entries: Vec<TagEntry>,
    // folded tag -> position of the first entry in sorted order with that fold
    by_folded_tag: HashMap<String, usize>,
}

impl RankedIndex {
    /// Consumes the table and sorts its entries.
    pub fn from_table(table: FrequencyTable) -> Self {
        let mut entries: Vec<TagEntry> = table
            .into_iter()
            .map(|(tag, count)| TagEntry { tag, count })
            .collect();
        entries.sort();

        let mut by_folded_tag = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            by_folded_tag
                .entry(entry.tag.fold_case())
                .or_insert(position);
        }

        Self {
            entries,
            by_folded_tag,
        }
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first `n` entries, or all of them if the index is smaller.
    pub fn top_n(&self, n: usize) -> &[TagEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Returns the last `n` entries in reverse, lowest count first.
    ///
    /// ```
    /// use movie_tags::ranked_index::{RankedIndex, TagEntry};
    /// # use movie_tags::aggregator::Aggregator;
    /// # let lines = ["h", "a,b,x,d", "a,b,y,d", "a,b,y,d", "a,b,z,d"];
    /// # let index = RankedIndex::from_table(Aggregator::default().build(lines).unwrap());
    /// // index is [(y, 2), (x, 1), (z, 1)]
    /// let bottom: Vec<&TagEntry> = index.bottom_n(2).collect();
    /// assert_eq!(bottom, [&TagEntry::new("z", 1), &TagEntry::new("x", 1)]);
    /// ```
    pub fn bottom_n(&self, n: usize) -> impl ExactSizeIterator<Item = &TagEntry> + '_ {
        self.entries.iter().rev().take(n)
    }

    /// Returns the count of the first entry, in sorted order, whose tag equals `tag`
    /// ignoring case.
    pub fn lookup_by_tag(&self, tag: &str) -> Option<u64> {
        self.by_folded_tag
            .get(&tag.fold_case())
            .map(|&position| self.entries[position].count)
    }

    /// Returns every tag whose count is exactly `count`, in ascending tag order.
    ///
    /// Entries sharing a count are contiguous in the index, so the run is located with two
    /// binary searches.
    pub fn lookup_by_count(&self, count: u64) -> Vec<&str> {
        let start = self.entries.partition_point(|e| e.count > count);
        let end = self.entries.partition_point(|e| e.count >= count);
        self.entries[start..end]
            .iter()
            .map(|e| e.tag.as_str())
            .collect()
    }
}

use std::fmt;

use crate::ranked_index::RankedIndex;

const RULE: &str = "==========================================";

/// The most and least frequent tags of an index, printed once at startup.
///
/// # Examples
///
/// ```
/// # use movie_tags::aggregator::Aggregator;
/// use movie_tags::leaderboard::Leaderboard;
/// use movie_tags::ranked_index::RankedIndex;
///
/// let lines = ["header", "1,1,drama,0", "1,2,comedy,0", "1,3,drama,0"];
/// let index = RankedIndex::from_table(Aggregator::default().build(lines).unwrap());
///
/// let board = Leaderboard::new(&index, 1).to_string();
/// assert_eq!(
///     board,
///     "==========================================\n\
///      *** Highest 1 tags by count ***\n\
///      2: drama\n\
///      *** Lowest 1 tags by count ***\n\
///      1: comedy\n\
///      ==========================================\n"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Leaderboard<'a> {
    index: &'a RankedIndex,
    size: usize,
}

impl<'a> Leaderboard<'a> {
    pub fn new(index: &'a RankedIndex, size: usize) -> Self {
        Self { index, size }
    }
}

impl fmt::Display for Leaderboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "*** Highest {} tags by count ***", self.size)?;
        for entry in self.index.top_n(self.size) {
            writeln!(f, "{}", entry)?;
        }
        writeln!(f, "*** Lowest {} tags by count ***", self.size)?;
        for entry in self.index.bottom_n(self.size) {
            writeln!(f, "{}", entry)?;
        }
        writeln!(f, "{}", RULE)
    }
}

/// Case-insensitive comparison for tags and typed commands.
///
/// Every character is folded on its own, never by its position in the word: it is mapped
/// to its single uppercase form and that to its lowercase form. So the final sigma `ς`,
/// `σ` and `Σ` share a key, and `İ` folds to a plain `i`.
///
/// # Examples
///
/// ```
/// use movie_tags::traits::FoldCase;
///
/// assert_eq!("Sci-Fi".fold_case(), "sci-fi");
/// assert_eq!("ΟΔΥΣ".fold_case(), "οδυσ".fold_case());
/// assert_eq!("İstanbul".fold_case(), "istanbul");
/// assert!("exit".matches_ignore_case("EXIT"));
/// assert!(!"exits".matches_ignore_case("EXIT"));
/// ```
pub trait FoldCase {
    /// Returns the key two strings share when they differ only in case.
    fn fold_case(&self) -> String;

    /// Returns true when both strings fold to the same key.
    fn matches_ignore_case(&self, other: &str) -> bool;
}

/// Folds one character. Mappings that expand to several characters (`ß` → `SS`) leave the
/// character as it is, and a multi-character lowercase keeps its base letter.
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    let upper = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    };
    upper.to_lowercase().next().unwrap_or(upper)
}

impl FoldCase for str {
    fn fold_case(&self) -> String {
        self.chars().map(fold_char).collect()
    }

    fn matches_ignore_case(&self, other: &str) -> bool {
        // cheap path for the single-letter commands
        if self.is_ascii() && other.is_ascii() {
            return self.eq_ignore_ascii_case(other);
        }
        self.chars().map(fold_char).eq(other.chars().map(fold_char))
    }
}

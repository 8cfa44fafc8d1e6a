use super::stopwords::is_stop_word;

/// Splits text into lowercase alphanumeric tokens, dropping stop words
///
/// A token is a maximal run of alphanumeric characters, so "don't" yields
/// "don" and "t".
///
/// # Examples
///
/// ```
/// use sumi_sieve::content::tokenize;
///
/// let tokens = tokenize("The Crawler visits ICS pages, then stops.");
/// assert_eq!(tokens, vec!["crawler", "visits", "ics", "pages", "stops"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|run| !run.is_empty())
        .map(str::to_lowercase)
        .filter(|word| !is_stop_word(word))
        .collect()
}

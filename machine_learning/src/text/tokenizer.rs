/// Minimum amount of characters a token must have to be kept.
const MIN_TOKEN_CHARS: usize = 2;

/// Splits a document into lowercase word tokens.
///
/// A word is a maximal run of alphanumeric characters or `_`, and words shorter than
/// two characters are dropped.
///
/// # Arguments
/// * `doc` - The document to tokenize.
///
/// # Returns
/// An iterator over the tokens, in order of appearance.
pub fn tokenize(doc: &str) -> impl Iterator<Item = String> + '_ {
    doc.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
}

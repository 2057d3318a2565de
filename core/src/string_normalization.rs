use unidecode::unidecode;

/// Folds a tag name to its canonical spelling: ASCII transliteration,
/// lowercase, single spaces. "Hip  Hop" and "hip hop" end up the same tag.
pub fn canonical_tag_name(input: &str) -> String {
    let ascii = unidecode(input).to_lowercase();
    let mut words = ascii.split_whitespace();
    let mut canonical = String::with_capacity(ascii.len());

    if let Some(first) = words.next() {
        canonical.push_str(first);
        for word in words {
            canonical.push(' ');
            canonical.push_str(word);
        }
    }

    canonical
}

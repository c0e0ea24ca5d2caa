//! Movie title helpers.
//!
//! Titles are stored with whatever casing was submitted. Matching goes
//! through [`title_key`]; display goes through [`title_case`].

/// Capitalize each space-separated word: first character uppercased, the
/// rest lowercased.
///
/// This is purely mechanical, so roman numerals and small words are not
/// special-cased: `"the GODFATHER part II"` becomes `"The Godfather Part Ii"`.
#[must_use]
pub fn title_case(title: &str) -> String {
    title
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Case-insensitive lookup key for a title.
#[must_use]
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// Whether two titles refer to the same movie.
#[must_use]
pub fn titles_match(a: &str, b: &str) -> bool {
    title_key(a) == title_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_is_mechanical() {
        assert_eq!(title_case("the GODFATHER part II"), "The Godfather Part Ii");
    }

    #[test]
    fn test_title_case_single_word() {
        assert_eq!(title_case("dune"), "Dune");
        assert_eq!(title_case("DUNE"), "Dune");
    }

    #[test]
    fn test_title_case_keeps_spacing() {
        assert_eq!(title_case("  blade   runner "), "  Blade   Runner ");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_punctuation_and_unicode() {
        assert_eq!(title_case("wall-e"), "Wall-e");
        assert_eq!(title_case("amélie ÉTÉ"), "Amélie Été");
        assert_eq!(title_case("2001: a space odyssey"), "2001: A Space Odyssey");
    }

    #[test]
    fn test_titles_match_ignores_case() {
        assert!(titles_match("Dune", "dUNE"));
        assert!(!titles_match("Dune", "Dune 2"));
        assert_eq!(title_key("The Thing"), "the thing");
    }
}

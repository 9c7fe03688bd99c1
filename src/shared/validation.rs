use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating slug fields.
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "electronics", "gaming-laptops", "tv-4k"
    /// - Invalid: "-tv", "tv-", "tv--4k", "TV", "tv_4k"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("electronics"));
        assert!(SLUG_REGEX.is_match("gaming-laptops"));
        assert!(SLUG_REGEX.is_match("tv-4k"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-tv")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("tv-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("tv--4k")); // double hyphen
        assert!(!SLUG_REGEX.is_match("TV")); // uppercase
        assert!(!SLUG_REGEX.is_match("tv_4k")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("tv 4k")); // space
    }
}

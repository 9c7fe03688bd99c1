//! Slug derivation for category names.
//!
//! Names pass through a pluggable transliterator before slugification, so
//! deployments with non-Latin category names can swap in their own mapping.

use crate::shared::constants::SLUG_MAX_LENGTH;

/// Maps a display name to a slugifiable string before slugification.
pub trait SlugTransliterator: Send + Sync {
    fn transliterate(&self, input: &str) -> String;
}

/// Default transliterator: folds common accented Latin characters to ASCII
/// and passes everything else through unchanged.
pub struct LatinFoldTransliterator;

impl SlugTransliterator for LatinFoldTransliterator {
    fn transliterate(&self, input: &str) -> String {
        input.chars().map(fold_latin).collect()
    }
}

fn fold_latin(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        _ => c,
    }
}

/// Slugify a string: lowercase, runs of non-alphanumeric characters collapse
/// to single hyphens, leading/trailing hyphens trimmed, capped at
/// `SLUG_MAX_LENGTH` characters.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug.chars().take(SLUG_MAX_LENGTH).collect()
}

/// Derive a slug from a category name: transliterate, then slugify.
pub fn derive_slug(transliterator: &dyn SlugTransliterator, name: &str) -> String {
    slugify(&transliterator.transliterate(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Electronics"), "electronics");
        assert_eq!(slugify("Gaming Laptops"), "gaming-laptops");
        assert_eq!(slugify("TVs & Home Theater"), "tvs-home-theater");
    }

    #[test]
    fn test_slugify_trims_and_collapses() {
        assert_eq!(slugify("  Hello,  World!  "), "hello-world");
        assert_eq!(slugify("--a--b--"), "a-b");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_truncates_to_max_length() {
        let long = "x".repeat(80);
        let slug = slugify(&long);
        assert_eq!(slug.len(), SLUG_MAX_LENGTH);
    }

    #[test]
    fn test_derive_slug_transliterates_first() {
        let t = LatinFoldTransliterator;
        assert_eq!(derive_slug(&t, "Café Équipement"), "cafe-equipement");
        assert_eq!(derive_slug(&t, "Señor Açaí"), "senor-acai");
    }

    #[test]
    fn test_custom_transliterator_is_honored() {
        struct Upside;
        impl SlugTransliterator for Upside {
            fn transliterate(&self, input: &str) -> String {
                input.replace('4', "four")
            }
        }
        assert_eq!(derive_slug(&Upside, "TV 4K"), "tv-fourk");
    }
}

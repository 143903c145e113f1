//! Optional Unicode cleanup applied to raw page text.

use unicode_normalization::UnicodeNormalization;

/// Typographic ligatures and their expansions.
const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// NFC-normalize a page, expand ligatures and drop U+FFFD.
///
/// Line structure is untouched, so the boilerplate and heading rules see the
/// same lines they would without normalization.
pub fn normalize_page(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.nfc() {
        match c {
            '\u{FFFD}' => {}
            c => match LIGATURES.iter().find(|(lig, _)| *lig == c) {
                Some((_, expansion)) => result.push_str(expansion),
                None => result.push(c),
            },
        }
    }
    result
}

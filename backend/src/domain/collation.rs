//! Locale-aware ordering for user-visible names.
//!
//! Names are compared the way a root-locale collator would on its first three
//! levels: base letters first (accents and case ignored), then accents, then
//! case with lowercase sorting before uppercase. Raw code points break any
//! remaining tie so the ordering is total.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

fn base_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
}

fn accented_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value.nfd().flat_map(char::to_lowercase)
}

fn case_weights(value: &str) -> impl Iterator<Item = u8> + '_ {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| u8::from(ch.is_uppercase()))
}

/// Compare two names using locale-aware ordering.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use recipe_companion::domain::locale_cmp;
///
/// assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_cmp("éclair", "eggs"), Ordering::Less);
/// assert_eq!(locale_cmp("rice", "Rice"), Ordering::Less);
/// ```
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| accented_letters(left).cmp(accented_letters(right)))
        .then_with(|| case_weights(left).cmp(case_weights(right)))
        .then_with(|| left.cmp(right))
}

/// Stable in-place sort of `items` by the name returned from `name_of`.
pub fn sort_by_name<T>(items: &mut [T], name_of: impl Fn(&T) -> &str) {
    items.sort_by(|left, right| locale_cmp(name_of(left), name_of(right)));
}

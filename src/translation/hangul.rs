//! Detection of Korean text.

const SYLLABLE_FIRST: char = '\u{AC00}'; // 가
const SYLLABLE_LAST: char = '\u{D7A3}'; // 힣

/// Returns `true` for a precomposed Hangul syllable (가..힣).
pub const fn is_hangul_syllable(c: char) -> bool {
    matches!(c, SYLLABLE_FIRST..=SYLLABLE_LAST)
}

/// Returns `true` if `text` contains at least one Hangul syllable.
///
/// Bare jamo such as `ㅋㅋ` do not count.
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(is_hangul_syllable)
}

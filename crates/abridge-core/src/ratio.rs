//! Word counting and the compression ratio.

/// Number of whitespace-separated words in `text`.
///
/// The ASCII information separators (U+001C to U+001F) also break words.
pub fn word_count(text: &str) -> usize {
  text
    .split(is_separator)
    .filter(|word| !word.is_empty())
    .count()
}

fn is_separator(c: char) -> bool { c.is_whitespace() || ('\x1c'..='\x1f').contains(&c) }

/// Summary length as a percentage of the original, rounded to two decimals.
///
/// An original with no words yields `0.0` rather than a non-finite value.
pub fn compression_ratio(original: &str, summary: &str) -> f64 {
  let original_words = word_count(original);
  if original_words == 0 {
    return 0.0;
  }
  let ratio = word_count(summary) as f64 / original_words as f64 * 100.0;
  round2(ratio)
}

/// Exact halves go to the even neighbour, so 15.625 becomes 15.62.
fn round2(value: f64) -> f64 { (value * 100.0).round_ties_even() / 100.0 }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counts_words_across_mixed_whitespace() {
    assert_eq!(word_count("  one\ttwo\nthree   four "), 4);
    assert_eq!(word_count(""), 0);
    assert_eq!(word_count("   \n\t"), 0);
  }

  #[test]
  fn information_separators_break_words() {
    assert_eq!(word_count("one\x1ctwo\x1dthree\x1efour\x1ffive"), 5);
    assert_eq!(word_count("\x1f\x1f"), 0);
    assert_eq!(word_count("a\u{00a0}b\u{3000}c"), 3);
  }

  #[test]
  fn ratio_is_a_percentage() {
    let original = "a b c d e f g h i j";
    assert_eq!(compression_ratio(original, "a b c"), 30.0);
    assert_eq!(compression_ratio(original, original), 100.0);
  }

  #[test]
  fn ratio_rounds_to_two_decimals() {
    // 1 / 3 * 100 = 33.333...
    assert_eq!(compression_ratio("a b c", "a"), 33.33);
    // 2 / 3 * 100 = 66.666...
    assert_eq!(compression_ratio("a b c", "a b"), 66.67);
  }

  #[test]
  fn exact_halves_round_to_even() {
    let original = vec!["word"; 32].join(" ");
    // 5 / 32 * 100 = 15.625 exactly
    assert_eq!(compression_ratio(&original, "a b c d e"), 15.62);
    // 7 / 32 * 100 = 21.875 exactly
    assert_eq!(compression_ratio(&original, "a b c d e f g"), 21.88);
  }

  #[test]
  fn empty_original_yields_zero() {
    assert_eq!(compression_ratio("", "anything at all"), 0.0);
  }
}

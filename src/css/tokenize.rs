//! Splitting a CSS abbreviation into one token per declaration.

use once_cell::sync::Lazy;
use regex::Regex;

/// A piece after `+` starting like this continues the previous argument list
/// (`bd1+#000`, `trf+-1`) instead of naming a new property.
static CONTINUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[ #0-9$]|-[0-9])").unwrap());

/// `m10+p5` -> `["m10", "p5"]`.
///
/// Pieces are considered pairwise: when the piece after a `+` is empty or
/// continues an argument list, the two are rejoined with the `+` and the scan
/// moves past both.
pub fn tokenize(input: &str) -> Vec<String> {
    let pieces: Vec<&str> = input.split('+').collect();
    let mut tokens = Vec::with_capacity(pieces.len());
    let mut index = 0;
    while index < pieces.len() {
        let piece = pieces[index];
        match pieces.get(index + 1) {
            Some(next) if next.is_empty() || CONTINUATION.is_match(next) => {
                tokens.push(format!("{piece}+{next}"));
                index += 2;
            }
            _ => {
                tokens.push(piece.to_string());
                index += 1;
            }
        }
    }
    tokens.retain(|token| !token.trim().is_empty());
    tokens
}

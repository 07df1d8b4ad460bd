//! Token patterns and small scanning helpers shared by the parser functions.
//!
//! Every pattern is anchored at the start of the remaining input; a helper
//! returns the captures together with the input left after the match.

use super::ast::{NumberingExpr, Segment, Template};
use crate::error::ParseFailure;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub(super) static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z!][a-zA-Z0-9:!$@-]*)(/)?").unwrap());

/// Body of an `#id` or `.class` qualifier.
pub(super) static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_$@-]+").unwrap());

pub(super) static MULTIPLIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*(\d+)").unwrap());

pub(super) static PROPERTY_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s="\]]+"#).unwrap());

pub(super) static QUOTED_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"([^"]*)""#).unwrap());

pub(super) static BARE_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s,+>{})\]]*").unwrap());

/// `$`-run with its optional `@[-][N]` direction/base suffix.
pub(super) static NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\$+)(?:@(-)?(\d*))?").unwrap());

pub(super) static LOREM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:lorem|lipsum)(\d*)$").unwrap());

pub(super) static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").unwrap());

/// Match `pattern` at the start of `input`.
pub(super) fn take<'a>(pattern: &Regex, input: &'a str) -> Option<(Captures<'a>, &'a str)> {
    let captures = pattern.captures(input)?;
    let end = captures.get(0)?.end();
    Some((captures, &input[end..]))
}

/// Like [`take`], but only the matched text is of interest.
pub(super) fn take_str<'a>(pattern: &Regex, input: &'a str) -> Option<(&'a str, &'a str)> {
    let found = pattern.find(input)?;
    Some((found.as_str(), &input[found.end()..]))
}

pub(super) fn skip_whitespace(input: &str) -> &str {
    take_str(&WHITESPACE, input).map_or(input, |(_, rest)| rest)
}

/// Parse a numbering token at the start of `input`, if there is one.
fn numbering(input: &str) -> Option<(NumberingExpr, &str)> {
    let (captures, rest) = take(&NUMBERING, input)?;
    let digits = captures.get(1).map_or(1, |m| m.as_str().len());
    let descending = captures.get(2).is_some();
    let base = captures
        .get(3)
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .unwrap_or(1);
    Some((NumberingExpr::new(digits, !descending, base), rest))
}

/// Split a selector fragment (tag name, id, class, attribute value) into literal
/// runs and numbering tokens.
pub(super) fn split_numbering(text: &str) -> Template {
    let mut template = Template::default();
    let mut rest = text;
    while let Some(position) = rest.find('$') {
        template.push(Segment::Literal(rest[..position].to_string()));
        match numbering(&rest[position..]) {
            Some((expr, after)) => {
                template.push(Segment::Numbering(expr));
                rest = after;
            }
            None => {
                template.push(Segment::Literal("$".to_string()));
                rest = &rest[position + 1..];
            }
        }
    }
    template.push(Segment::Literal(rest.to_string()));
    template
}

/// Scan `{...}` text whose opening brace was already consumed.
///
/// A backslash makes the next character literal (so `\}` and `\$` never close
/// the text or start a numbering token). Returns the text and the input after
/// the closing brace.
pub(super) fn braced_text(input: &str) -> Result<(Template, &str), ParseFailure> {
    let mut template = Template::default();
    let mut literal = String::new();
    let mut chars = input.char_indices();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    literal.push(escaped);
                }
            }
            '}' => {
                template.push(Segment::Literal(std::mem::take(&mut literal)));
                return Ok((template, &input[offset + 1..]));
            }
            '$' => {
                let (expr, after) = numbering(&input[offset..])
                    .ok_or_else(|| ParseFailure::hard("a numbering token"))?;
                template.push(Segment::Literal(std::mem::take(&mut literal)));
                template.push(Segment::Numbering(expr));
                let consumed = input.len() - offset - after.len();
                // Skip the rest of the token; the first `$` was already yielded.
                for _ in 1..input[offset..offset + consumed].chars().count() {
                    chars.next();
                }
            }
            other => literal.push(other),
        }
    }
    Err(ParseFailure::hard("`}` closing the text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_returns_remaining_input() {
        let (captures, rest) = take(&MULTIPLIER, "*12>li").unwrap();
        assert_eq!(&captures[1], "12");
        assert_eq!(rest, ">li");
        assert!(take(&MULTIPLIER, "li*2").is_none());
    }

    #[test]
    fn tag_name_captures_self_closing_slash() {
        let (captures, rest) = take(&TAG_NAME, "br/+p").unwrap();
        assert_eq!(&captures[1], "br");
        assert!(captures.get(2).is_some());
        assert_eq!(rest, "+p");
    }

    #[test]
    fn numbering_suffixes() {
        assert_eq!(numbering("$").unwrap().0, NumberingExpr::new(1, true, 1));
        assert_eq!(numbering("$$$@0").unwrap().0, NumberingExpr::new(3, true, 0));
        assert_eq!(numbering("$@-").unwrap().0, NumberingExpr::new(1, false, 1));
        assert_eq!(numbering("$$@-3x").unwrap(), (NumberingExpr::new(2, false, 3), "x"));
    }

    #[test]
    fn split_numbering_keeps_literals_around_tokens() {
        let template = split_numbering("item$$-end");
        assert_eq!(template.resolve(2, 3).as_literal(), Some("item03-end"));
        assert_eq!(split_numbering("plain").as_literal(), Some("plain"));
    }

    #[test]
    fn braced_text_handles_escapes_and_numbering() {
        let (template, rest) = braced_text(r"a\}b$@-5}*2").unwrap();
        assert_eq!(rest, "*2");
        assert_eq!(template.resolve(0, 2).as_literal(), Some("a}b6"));

        let (template, _) = braced_text(r"cost \$5}").unwrap();
        assert_eq!(template.as_literal(), Some("cost $5"));
    }

    #[test]
    fn unterminated_text_is_a_committed_failure() {
        let failure = braced_text("never closed").unwrap_err();
        assert!(failure.committed);
    }
}

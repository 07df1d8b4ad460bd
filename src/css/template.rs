//! Compiled CSS snippet templates.
//!
//! Placeholders are `|`, `${N}` and `${N:default}`. `${N}` fills slot `N - 1`;
//! `|` and `${:default}` take the slot of their position among placeholders.
//! Arguments beyond the highest slot are joined with spaces into that slot.

use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\||\$\{(\d*)(?::([^}]*))?\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Slot { index: usize, default: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssTemplate {
    pieces: Vec<Piece>,
    /// Highest slot index, the one extra arguments pile into.
    last_slot: Option<usize>,
}

impl CssTemplate {
    pub fn compile(source: &str) -> Self {
        let mut pieces = Vec::new();
        let mut last_slot: Option<usize> = None;
        let mut cursor = 0;
        for (ordinal, captures) in PLACEHOLDER.captures_iter(source).enumerate() {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            if whole.start() > cursor {
                pieces.push(Piece::Literal(source[cursor..whole.start()].to_string()));
            }
            cursor = whole.end();
            let index = captures
                .get(1)
                .and_then(|n| n.as_str().parse::<usize>().ok())
                .map_or(ordinal, |n| n.saturating_sub(1));
            let default = captures.get(2).map_or("", |m| m.as_str()).to_string();
            last_slot = Some(last_slot.map_or(index, |last| last.max(index)));
            pieces.push(Piece::Slot { index, default });
        }
        if cursor < source.len() {
            pieces.push(Piece::Literal(source[cursor..].to_string()));
        }
        Self { pieces, last_slot }
    }

    pub fn slot_count(&self) -> usize {
        self.last_slot.map_or(0, |last| last + 1)
    }

    /// The property name: the text before the first `:`.
    pub fn property(&self) -> Option<&str> {
        match self.pieces.first() {
            Some(Piece::Literal(text)) => text.split_once(':').map(|(name, _)| name.trim()),
            _ => None,
        }
    }

    /// Fill the slots with `args`, defaults standing in for missing ones.
    pub fn format(&self, args: &[String]) -> String {
        let slots: Vec<String> = match self.last_slot {
            Some(last) if args.len() > last => {
                let mut slots = args[..last].to_vec();
                slots.push(args[last..].join(" "));
                slots
            }
            _ => args.to_vec(),
        };
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(text) => text.as_str(),
                Piece::Slot { index, default } => slots.get(*index).map_or(default.as_str(), String::as_str),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn cursor_slot_collects_every_argument() {
        let template = CssTemplate::compile("margin: |;");
        assert_eq!(template.format(&args(&["10px", "-20px"])), "margin: 10px -20px;");
        assert_eq!(template.format(&[]), "margin: ;");
        assert_eq!(template.property(), Some("margin"));
    }

    #[test]
    fn numbered_slots_use_defaults() {
        let template = CssTemplate::compile("border: ${1:1px} ${2:solid} ${3:#000};");
        assert_eq!(template.slot_count(), 3);
        assert_eq!(template.format(&args(&["2px"])), "border: 2px solid #000;");
        assert_eq!(
            template.format(&args(&["2px", "dashed", "#f00", "!x"])),
            "border: 2px dashed #f00 !x;"
        );
    }

    #[test]
    fn template_without_placeholders_ignores_arguments() {
        let template = CssTemplate::compile("display: none;");
        assert_eq!(template.slot_count(), 0);
        assert_eq!(template.format(&args(&["x"])), "display: none;");
    }
}

//! Tag aliases.
//!
//! An alias maps a tag name to an abbreviation (`bq` -> `blockquote`,
//! `ol+` -> `ol>li`). Source entries are parsed on first use and stored back into
//! the context as trees; every use works on a clone. The caller's qualifiers are
//! merged into the first tag of the expansion:
//!
//! - id: the caller's, when it wrote one
//! - classes: the alias's followed by the caller's, duplicates removed
//! - attributes: the alias's, overridden per key and extended by the caller's
//! - text: the caller's, when it wrote one
//! - a caller `/` makes the tag bodiless

use super::ast::{Node, Tag, Template};
use super::parser::MarkupParser;
use crate::error::ParseFailure;
use crate::tables::AliasEntry;

impl MarkupParser<'_> {
    /// The expansion of alias `name`, or `None` when no alias applies.
    ///
    /// An alias whose expansion mentions its own name (`abbr` -> `abbr[title]`)
    /// sees the plain tag while it is being parsed. Aliases that reach each other
    /// (`x` -> `y`, `y` -> `x`) stop at the first repeated name; their trees
    /// depend on where the cycle was entered and are never cached.
    pub(super) fn resolve_alias(&mut self, name: &str) -> Result<Option<Node>, ParseFailure> {
        if let Some(open) = self.resolving.iter().position(|open| open == name) {
            if open + 1 < self.resolving.len() {
                for member in &self.resolving[open..] {
                    if !self.cyclic.contains(member) {
                        self.cyclic.push(member.clone());
                    }
                }
            }
            return Ok(None);
        }
        let source = match self.ctx.alias(name) {
            None => return Ok(None),
            Some(AliasEntry::Parsed(node)) => return Ok(Some(node.clone())),
            Some(AliasEntry::Source(source)) => source.clone(),
        };

        self.resolving.push(name.to_string());
        let parsed = self.complete(&source);
        self.resolving.pop();

        let node = parsed.map_err(|failure| {
            ParseFailure::hard(format!(
                "a valid expansion for alias `{name}` ({})",
                failure.expected
            ))
        })?;
        if self.cyclic.iter().any(|member| member == name) {
            tracing::debug!(alias = name, "alias is part of a cycle, not cached");
        } else {
            tracing::debug!(alias = name, "parsed alias expansion");
            self.ctx.cache_alias(name, node.clone());
        }
        Ok(Some(node))
    }

    /// Replace `tag` by its alias expansion, if it has one.
    pub(super) fn apply_alias(&mut self, tag: Tag) -> Result<Node, ParseFailure> {
        let Some(name) = tag.literal_name().map(str::to_string) else {
            return Ok(Node::Tag(tag));
        };
        match self.resolve_alias(&name)? {
            Some(expansion) => Ok(merge(expansion, &tag)),
            None => Ok(Node::Tag(tag)),
        }
    }
}

/// Fold the caller's qualifiers into the first tag of `expansion`.
pub fn merge(mut expansion: Node, caller: &Tag) -> Node {
    if let Some(target) = expansion.first_tag_mut() {
        if caller.id.is_some() {
            target.id = caller.id.clone();
        }
        target.classes = merge_classes(&target.classes, &caller.classes);
        target.properties = merge_properties(&target.properties, &caller.properties);
        if caller.text.is_some() {
            target.text = caller.text.clone();
        }
        if !caller.has_body {
            target.has_body = false;
        }
    }
    expansion
}

fn merge_classes(base: &[Template], extra: &[Template]) -> Vec<Template> {
    let mut merged: Vec<Template> = Vec::with_capacity(base.len() + extra.len());
    for class in base.iter().chain(extra) {
        if !merged.contains(class) {
            merged.push(class.clone());
        }
    }
    merged
}

/// `base` in order with values replaced by `overrides` on equal keys; keys only
/// in `overrides` follow in their own order.
pub fn merge_properties<V: Clone>(base: &[(String, V)], overrides: &[(String, V)]) -> Vec<(String, V)> {
    let mut merged: Vec<(String, V)> = base.to_vec();
    for (key, value) in overrides {
        match merged.iter_mut().find(|(existing, _)| existing == key) {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((key.clone(), value.clone())),
        }
    }
    merged
}

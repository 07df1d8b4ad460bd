//! Recursive-descent parser for markup abbreviations.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expression   := siblings
//! siblings     := parent-child ('+' parent-child)*      left-assoc
//!               | parent-child '+'                      expand shorthand (`ol+`)
//! parent-child := multiplier ('>' expression)?
//! multiplier   := atom ('*' digits)?
//! atom         := group | text | tag | implicit-div
//! group        := '(' expression ')'
//! text         := '{' ... '}'
//! tag          := name '/'? qualifier* text?
//! qualifier    := '#' ident | '.' ident | '[' property* ']'
//! implicit-div := qualifier+ text?                      a tag named `div`
//! ```
//!
//! Every function takes the remaining input and returns the parsed node with the
//! input left over. Atoms are tried in order through [`first_success`]; once an
//! operator or an opening bracket is consumed, failures are committed and stop
//! the search for alternatives.
//!
//! Aliases are resolved as soon as a tag is complete (see `alias.rs`), and
//! multipliers are materialized as soon as their subject is complete, so the tree
//! leaving the parser holds neither alias names nor `*N` markers.

use super::ast::{Node, Tag, Template};
use super::numbering;
use super::scan::{self, split_numbering};
use crate::context::ExpansionContext;
use crate::error::{ExpandError, ParseFailure};

pub(super) type PResult<'s, T> = Result<(T, &'s str), ParseFailure>;

type Alternative<'c> = for<'p, 's> fn(&'p mut MarkupParser<'c>, &'s str) -> PResult<'s, Node>;

/// Word count for a lorem marker without digits.
pub const DEFAULT_LOREM_WORDS: usize = 30;

/// A parsed atom and the multiplier applied to it, not yet materialized.
struct Multiplied {
    node: Node,
    count: Option<usize>,
}

pub struct MarkupParser<'c> {
    pub(super) ctx: &'c mut ExpansionContext,
    depth: usize,
    /// Aliases whose expansion is being parsed right now.
    pub(super) resolving: Vec<String>,
    /// Aliases whose expansion was cut short by a cycle through another alias.
    pub(super) cyclic: Vec<String>,
    limit_exceeded: Option<(&'static str, usize)>,
}

impl<'c> MarkupParser<'c> {
    pub fn new(ctx: &'c mut ExpansionContext) -> Self {
        Self {
            ctx,
            depth: 0,
            resolving: Vec::new(),
            cyclic: Vec::new(),
            limit_exceeded: None,
        }
    }

    /// Parse a whole abbreviation, including any `|filter` suffix.
    pub fn parse(&mut self, abbreviation: &str) -> Result<Node, ExpandError> {
        let (expression, filters) = split_filters(abbreviation);
        let node = self
            .complete(expression)
            .map_err(|failure| match self.limit_exceeded.take() {
                Some((what, limit)) => ExpandError::limit(what, limit),
                None => ExpandError::Parse(failure),
            })?;
        if filters.is_empty() {
            return Ok(node);
        }
        Ok(Node::FilterWrap {
            filters,
            inner: Box::new(node),
        })
    }

    /// An expression that must consume all of `input`.
    pub(super) fn complete(&mut self, input: &str) -> Result<Node, ParseFailure> {
        let (node, rest) = self.expression(input)?;
        if rest.is_empty() {
            Ok(node)
        } else {
            Err(ParseFailure::hard(format!("end of input before `{rest}`")))
        }
    }

    pub(super) fn expression<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        let max_depth = self.ctx.limits().max_depth;
        if self.depth >= max_depth {
            return Err(self.limit("nesting depth", max_depth));
        }
        self.depth += 1;
        let result = self.siblings(input);
        self.depth -= 1;
        result
    }

    fn siblings<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        let (mut left, mut rest) = self.parent_child(input)?;
        while let Some(after) = rest.strip_prefix('+') {
            match self.parent_child(after) {
                Ok((right, after_right)) => {
                    left = Node::sibling(left, right);
                    rest = after_right;
                }
                Err(failure) if !failure.committed => {
                    left = self.expand_shorthand(left)?;
                    rest = after;
                }
                Err(failure) => return Err(failure),
            }
        }
        if matches!(left, Node::Sibling { .. }) {
            self.check_node_count(&left)?;
        }
        Ok((left, rest))
    }

    /// `name+` with nothing parsable after the `+`: replace the rightmost operand
    /// by the `name+` alias.
    fn expand_shorthand(&mut self, node: Node) -> Result<Node, ParseFailure> {
        match node {
            Node::Sibling { mut items } => {
                let Some(last) = items.pop() else {
                    return Err(ParseFailure::hard("an expression after `+`"));
                };
                items.push(self.expand_shorthand(last)?);
                Ok(Node::Sibling { items })
            }
            Node::Tag(tag) => {
                let Some(name) = tag.literal_name().map(|name| format!("{name}+")) else {
                    return Err(ParseFailure::hard("an expression after `+`"));
                };
                match self.resolve_alias(&name)? {
                    Some(expansion) => Ok(super::alias::merge(expansion, &tag)),
                    None => Err(ParseFailure::hard("an expression after `+`")),
                }
            }
            _ => Err(ParseFailure::hard("an expression after `+`")),
        }
    }

    fn parent_child<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        let (subject, rest) = self.multiplier(input)?;
        let Some(after) = rest.strip_prefix('>') else {
            return Ok((self.materialize(subject)?, rest));
        };
        let (child, rest) = self.expression(after).map_err(|failure| {
            if failure.committed {
                failure
            } else {
                ParseFailure::hard("an expression after `>`")
            }
        })?;
        let node = attach_child(subject.node, child)?;
        self.check_node_count(&node)?;
        let node = self.materialize(Multiplied {
            node,
            count: subject.count,
        })?;
        Ok((node, rest))
    }

    fn multiplier<'s>(&mut self, input: &'s str) -> PResult<'s, Multiplied> {
        let (node, rest) = self.atom(input)?;
        if !rest.starts_with('*') {
            return Ok((Multiplied { node, count: None }, rest));
        }
        let (captures, rest) = scan::take(&scan::MULTIPLIER, rest)
            .ok_or_else(|| ParseFailure::hard("a repeat count after `*`"))?;
        let count = captures[1]
            .parse::<usize>()
            .map_err(|_| ParseFailure::hard("a repeat count that fits in a machine word"))?;
        Ok((
            Multiplied {
                node,
                count: Some(count),
            },
            rest,
        ))
    }

    fn materialize(&mut self, subject: Multiplied) -> Result<Node, ParseFailure> {
        let Some(count) = subject.count else {
            return Ok(subject.node);
        };
        let max_nodes = self.ctx.limits().max_nodes;
        if subject.node.node_count().saturating_mul(count) > max_nodes {
            return Err(self.limit("generated node", max_nodes));
        }
        Ok(numbering::multiply(&subject.node, count))
    }

    fn atom<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        let alternatives: [Alternative<'c>; 4] =
            [Self::group, Self::text_node, Self::tag, Self::implicit_div];
        first_success(self, input, &alternatives, "a tag, group or text")
    }

    fn group<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        let Some(after) = input.strip_prefix('(') else {
            return Err(ParseFailure::soft("`(`"));
        };
        let (inner, rest) = self.expression(after).map_err(ParseFailure::commit)?;
        let rest = rest
            .strip_prefix(')')
            .ok_or_else(|| ParseFailure::hard("`)` closing the group"))?;
        Ok((inner, rest))
    }

    fn text_node<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        let Some(after) = input.strip_prefix('{') else {
            return Err(ParseFailure::soft("`{`"));
        };
        let (content, rest) = scan::braced_text(after)?;
        Ok((Node::Text { content }, rest))
    }

    fn tag<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        let Some((captures, rest)) = scan::take(&scan::TAG_NAME, input) else {
            return Err(ParseFailure::soft("a tag name"));
        };
        let name = captures.get(1).map_or("", |m| m.as_str());
        let mut tag = Tag::new(split_numbering(name));
        tag.has_body = captures.get(2).is_none();
        let (tag, rest) = self.tag_body(tag, rest)?;

        if let Some((lorem, _)) = scan::take(&scan::LOREM, name) {
            let word_count = lorem
                .get(1)
                .and_then(|digits| digits.as_str().parse().ok())
                .unwrap_or(DEFAULT_LOREM_WORDS);
            return Ok((Node::Lorem { word_count }, rest));
        }
        Ok((self.apply_alias(tag)?, rest))
    }

    fn implicit_div<'s>(&mut self, input: &'s str) -> PResult<'s, Node> {
        if !input.starts_with(['#', '.']) {
            return Err(ParseFailure::soft("`#` or `.`"));
        }
        let (tag, rest) = self.tag_body(Tag::new("div"), input)?;
        Ok((self.apply_alias(tag)?, rest))
    }

    /// Qualifiers and the optional `{text}` following a tag name.
    fn tag_body<'s>(&mut self, mut tag: Tag, input: &'s str) -> PResult<'s, Tag> {
        let mut rest = input;
        loop {
            if let Some(after) = rest.strip_prefix('#') {
                let (ident, after) = scan::take_str(&scan::IDENTIFIER, after)
                    .ok_or_else(|| ParseFailure::hard("an id after `#`"))?;
                tag.id = Some(split_numbering(ident));
                rest = after;
            } else if let Some(after) = rest.strip_prefix('.') {
                let (ident, after) = scan::take_str(&scan::IDENTIFIER, after)
                    .ok_or_else(|| ParseFailure::hard("a class name after `.`"))?;
                tag.classes.push(split_numbering(ident));
                rest = after;
            } else if let Some(after) = rest.strip_prefix('[') {
                let (properties, after) = properties(after)?;
                tag.properties.extend(properties);
                rest = after;
            } else {
                break;
            }
        }
        if let Some(after) = rest.strip_prefix('{') {
            let (text, after) = scan::braced_text(after)?;
            tag.text = Some(text);
            rest = after;
        }
        Ok((tag, rest))
    }
}

/// Try each alternative in order; the first success or committed failure wins.
fn first_success<'c, 's>(
    parser: &mut MarkupParser<'c>,
    input: &'s str,
    alternatives: &[Alternative<'c>],
    expected: &str,
) -> PResult<'s, Node> {
    for alternative in alternatives {
        match alternative(parser, input) {
            Err(failure) if !failure.committed => continue,
            result => return result,
        }
    }
    Err(ParseFailure::soft(expected))
}

/// `key=value` pairs up to the closing `]`. Values may be bare, quoted or absent.
fn properties(input: &str) -> PResult<'_, Vec<(String, Template)>> {
    let mut properties = Vec::new();
    let mut rest = scan::skip_whitespace(input);
    loop {
        if let Some(after) = rest.strip_prefix(']') {
            return Ok((properties, after));
        }
        let (key, after) = scan::take_str(&scan::PROPERTY_KEY, rest)
            .ok_or_else(|| ParseFailure::hard("an attribute name or `]`"))?;
        let (value, after) = match after.strip_prefix('=') {
            Some(value) => match scan::take(&scan::QUOTED_VALUE, value) {
                Some((captures, after)) => (captures.get(1).map_or("", |m| m.as_str()), after),
                None => scan::take_str(&scan::BARE_VALUE, value).unwrap_or(("", value)),
            },
            None => ("", after),
        };
        properties.push((key.to_string(), split_numbering(value)));
        rest = scan::skip_whitespace(after);
    }
}

/// Hang `child` under the deepest, rightmost tag of `node`.
fn attach_child(node: Node, child: Node) -> Result<Node, ParseFailure> {
    match node {
        Node::Tag(tag) => Ok(Node::parent_child(tag, child)),
        Node::ParentChild { parent, child: existing } => {
            let grafted = match *existing {
                text @ (Node::Text { .. } | Node::Lorem { .. }) => Node::sibling(text, child),
                other => attach_child(other, child)?,
            };
            Ok(Node::parent_child(parent, grafted))
        }
        Node::Sibling { mut items } => {
            let last = items
                .pop()
                .ok_or_else(|| ParseFailure::hard("a tag before `>`"))?;
            items.push(attach_child(last, child)?);
            Ok(Node::Sibling { items })
        }
        Node::List { items } => {
            let items = items
                .into_iter()
                .map(|item| attach_child(item, child.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::List { items })
        }
        Node::FilterWrap { filters, inner } => Ok(Node::FilterWrap {
            filters,
            inner: Box::new(attach_child(*inner, child)?),
        }),
        Node::Text { .. } | Node::Lorem { .. } => {
            Err(ParseFailure::hard("a tag before `>`"))
        }
    }
}

impl MarkupParser<'_> {
    /// Grafting a child onto every copy of a list multiplies it too.
    fn check_node_count(&mut self, node: &Node) -> Result<(), ParseFailure> {
        let max_nodes = self.ctx.limits().max_nodes;
        if node.node_count() > max_nodes {
            return Err(self.limit("generated node", max_nodes));
        }
        Ok(())
    }

    fn limit(&mut self, what: &'static str, limit: usize) -> ParseFailure {
        self.limit_exceeded = Some((what, limit));
        ParseFailure::hard(format!("at most {limit} ({what} limit)"))
    }
}

/// Split `abbreviation|f1|f2` at the first `|` outside text, quotes and brackets.
/// Empty filter names are dropped.
pub(super) fn split_filters(abbreviation: &str) -> (&str, Vec<String>) {
    let mut in_text = false;
    let mut in_brackets = false;
    let mut in_quotes = false;
    let mut escaped = false;
    for (offset, ch) in abbreviation.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_text => escaped = true,
            '{' if !in_quotes => in_text = true,
            '}' if in_text => in_text = false,
            '[' if !in_text => in_brackets = true,
            ']' if in_brackets && !in_quotes => in_brackets = false,
            '"' if in_brackets => in_quotes = !in_quotes,
            '|' if !in_text && !in_brackets => {
                let filters = abbreviation[offset + 1..]
                    .split('|')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
                return (&abbreviation[..offset], filters);
            }
            _ => {}
        }
    }
    (abbreviation, Vec::new())
}

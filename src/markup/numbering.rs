//! Multiplier expansion.
//!
//! `multiply` materializes `node*count` into a [`Node::List`] of copies, each
//! produced by [`instantiate`] with its generation index. A nested multiplier is
//! materialized while its own subject is parsed, so by the time an outer
//! multiplier walks the tree the inner copies hold only literal text and the outer
//! index can never leak into them.

use super::ast::{Node, Tag, Template};

/// Copy `node` with every numbering token resolved for copy `index` of `limit`.
pub fn instantiate(node: &Node, index: usize, limit: usize) -> Node {
    match node {
        Node::Tag(tag) => Node::Tag(instantiate_tag(tag, index, limit)),
        Node::Text { content } => Node::Text {
            content: content.resolve(index, limit),
        },
        Node::List { items } => Node::List {
            items: instantiate_all(items, index, limit),
        },
        Node::Sibling { items } => Node::Sibling {
            items: instantiate_all(items, index, limit),
        },
        Node::ParentChild { parent, child } => Node::ParentChild {
            parent: instantiate_tag(parent, index, limit),
            child: Box::new(instantiate(child, index, limit)),
        },
        Node::FilterWrap { filters, inner } => Node::FilterWrap {
            filters: filters.clone(),
            inner: Box::new(instantiate(inner, index, limit)),
        },
        Node::Lorem { word_count } => Node::Lorem {
            word_count: *word_count,
        },
    }
}

fn instantiate_tag(tag: &Tag, index: usize, limit: usize) -> Tag {
    let resolve = |template: &Template| template.resolve(index, limit);
    Tag {
        name: resolve(&tag.name),
        has_body: tag.has_body,
        id: tag.id.as_ref().map(resolve),
        classes: tag.classes.iter().map(resolve).collect(),
        properties: tag
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), resolve(value)))
            .collect(),
        text: tag.text.as_ref().map(resolve),
    }
}

fn instantiate_all(items: &[Node], index: usize, limit: usize) -> Vec<Node> {
    items
        .iter()
        .map(|item| instantiate(item, index, limit))
        .collect()
}

/// `count` copies of `node` in generation order.
pub fn multiply(node: &Node, count: usize) -> Node {
    Node::list((0..count).map(|index| instantiate(node, index, count)).collect())
}

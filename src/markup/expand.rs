//! Post-parse pass: lorem markers become text.

use super::ast::{Node, Template};
use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};
use crate::lorem;

/// Replace every [`Node::Lorem`] in `node` with generated text.
pub fn expand_lorem(node: Node, ctx: &mut ExpansionContext) -> Result<Node> {
    Ok(match node {
        Node::Lorem { word_count } => {
            let limit = ctx.limits().max_lorem_words;
            if word_count > limit {
                return Err(ExpandError::limit("lorem word", limit));
            }
            Node::Text {
                content: Template::literal(lorem::generate(word_count, ctx.rng())),
            }
        }
        Node::ParentChild { parent, child } => Node::ParentChild {
            parent,
            child: Box::new(expand_lorem(*child, ctx)?),
        },
        Node::Sibling { items } => Node::Sibling {
            items: expand_all(items, ctx)?,
        },
        Node::List { items } => Node::List {
            items: expand_all(items, ctx)?,
        },
        Node::FilterWrap { filters, inner } => Node::FilterWrap {
            filters,
            inner: Box::new(expand_lorem(*inner, ctx)?),
        },
        leaf @ (Node::Tag(_) | Node::Text { .. }) => leaf,
    })
}

fn expand_all(items: Vec<Node>, ctx: &mut ExpansionContext) -> Result<Vec<Node>> {
    items
        .into_iter()
        .map(|item| expand_lorem(item, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Limits;
    use crate::markup::ast::Tag;
    use crate::tables::Tables;

    fn seeded() -> ExpansionContext {
        ExpansionContext::builder()
            .tables(Tables::empty())
            .seed(7)
            .build()
            .unwrap()
    }

    #[test]
    fn lorem_becomes_text_with_the_requested_word_count() {
        let node = Node::parent_child(Tag::new("p"), Node::Lorem { word_count: 12 });
        let Node::ParentChild { child, .. } = expand_lorem(node, &mut seeded()).unwrap() else {
            panic!("expected parent-child");
        };
        let Node::Text { content } = *child else {
            panic!("expected text");
        };
        assert_eq!(content.to_text().split_whitespace().count(), 12);
    }

    #[test]
    fn oversized_lorem_is_rejected() {
        let mut ctx = ExpansionContext::builder()
            .tables(Tables::empty())
            .limits(Limits {
                max_lorem_words: 5,
                ..Limits::default()
            })
            .build()
            .unwrap();
        let err = expand_lorem(Node::Lorem { word_count: 6 }, &mut ctx).unwrap_err();
        assert_eq!(err, ExpandError::limit("lorem word", 5));
    }
}

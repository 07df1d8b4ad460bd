//! Markup abbreviations: grammar, aliases and multiplier expansion.
//!
//! [`parse`] turns `ul#nav>li.item$*3>a{Link $}` into a [`Node`] tree with every
//! alias resolved and every multiplier materialized. Rendering is left to
//! [`crate::render`].

pub mod alias;
pub mod ast;
pub mod expand;
pub mod numbering;
pub mod parser;
mod scan;

pub use ast::{Node, NumberingExpr, Segment, Tag, Template};
pub use parser::MarkupParser;

use crate::context::ExpansionContext;
use crate::error::Result;

/// Parse `abbreviation` against the aliases of `ctx`.
///
/// A `|filter` suffix produces a [`Node::FilterWrap`] root.
pub fn parse(ctx: &mut ExpansionContext, abbreviation: &str) -> Result<Node> {
    let node = MarkupParser::new(ctx).parse(abbreviation)?;
    tracing::trace!(abbreviation, nodes = node.node_count(), "parsed markup abbreviation");
    Ok(node)
}

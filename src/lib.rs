//! # zencode
//!
//! Expands CSS-selector-like abbreviations into markup or CSS declarations.
//!
//! ```text
//! ul#nav>li.item$*2>a{Link $}
//!
//! <ul id="nav">
//!     <li class="item1"><a href="">Link 1</a></li>
//!     <li class="item2"><a href="">Link 2</a></li>
//! </ul>
//! ```
//!
//! ```text
//! m10+p5-10!    margin: 10px;
//!               padding: 5px -10px !important;
//! ```
//!
//! ## Pipeline
//!
//! - markup: `|filter` suffix split, [`markup::parse`] (aliases and multipliers
//!   resolved while parsing), lorem expansion, then a
//!   [`FilterChain`](render::filter::FilterChain) whose first stage is a markup
//!   renderer.
//! - CSS: [`css::tokenize`], [`css::parse_expression`] per declaration,
//!   [`css::render_expression`] through the snippet table of the requested syntax.
//!
//! All lookup tables and caches live in an [`ExpansionContext`]; nothing is
//! global. A failed expansion produces an error and no partial output.

pub mod context;
pub mod css;
pub mod error;
pub mod lorem;
pub mod markup;
pub mod options;
pub mod render;
pub mod settings;
pub mod tables;

pub use context::{ContextBuilder, ExpansionContext, Limits};
pub use error::{ConfigError, ExpandError, ParseFailure, Result};
pub use options::{CssSyntax, Dialect, RenderOptions, SelfClosingStyle};
pub use tables::Tables;

use markup::Node;
use render::filter::FilterChain;

/// Which grammar an abbreviation is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Markup,
    Css,
}

/// Expand a markup abbreviation.
pub fn expand_markup(ctx: &mut ExpansionContext, abbreviation: &str, options: &RenderOptions) -> Result<String> {
    let tree = markup::parse(ctx, abbreviation.trim())?;
    let (chain, tree) = match tree {
        Node::FilterWrap { filters, inner } => (FilterChain::from_names(filters.as_slice())?, *inner),
        tree => (FilterChain::default_for(ctx.tables(), options), tree),
    };
    let tree = markup::expand::expand_lorem(tree, ctx)?;
    chain.run(tree, ctx, options)
}

/// Expand a CSS abbreviation.
pub fn expand_css(ctx: &mut ExpansionContext, abbreviation: &str, options: &RenderOptions) -> Result<String> {
    css::expand(ctx, abbreviation, options)
}

/// Expand in `mode`, collapsing every failure to `None`.
pub fn expand(ctx: &mut ExpansionContext, abbreviation: &str, mode: Mode, options: &RenderOptions) -> Option<String> {
    let result = match mode {
        Mode::Markup => expand_markup(ctx, abbreviation, options),
        Mode::Css => expand_css(ctx, abbreviation, options),
    };
    match result {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(abbreviation, ?mode, error = %err, "expansion failed");
            None
        }
    }
}

//! CSS abbreviations: `m10+p5-10!` -> `margin: 10px;\npadding: 5px -10px !important;`.
//!
//! The pipeline is [`tokenize`] into one token per declaration,
//! [`parse_expression`] per token, then [`render_expression`] through the
//! snippet table of the requested syntax.

pub mod args;
pub mod expr;
pub mod template;
pub mod tokenize;

pub use args::{ColorArg, CssArg, NumericArg};
pub use expr::{parse_expression, render_expression, CssExpression, VendorPrefix};
pub use tokenize::tokenize;

use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};
use crate::options::RenderOptions;

/// Expand a whole CSS abbreviation, one declaration per line.
pub fn expand(ctx: &mut ExpansionContext, abbreviation: &str, options: &RenderOptions) -> Result<String> {
    let tokens = tokenize(abbreviation.trim());
    if tokens.is_empty() {
        return Err(ExpandError::InvalidCss(format!(
            "'{abbreviation}' contains no declarations"
        )));
    }
    let lines: Vec<String> = tokens
        .iter()
        .map(|token| {
            let expression = parse_expression(token, ctx.tables());
            render_expression(&expression, ctx, options.css_syntax)
        })
        .collect();
    Ok(lines.join("\n"))
}

//! HTML, plain and with selector comments.

use super::{indent, Element, MarkupRenderer};
use crate::options::RenderOptions;

pub struct HtmlRenderer;

impl MarkupRenderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn element(&self, element: &Element, options: &RenderOptions) -> String {
        html_element(element, options)
    }
}

/// HTML with every element carrying an id or class wrapped in
/// `<!-- #id.class -->` / `<!-- /#id.class -->` comments.
pub struct CommentedHtmlRenderer;

impl MarkupRenderer for CommentedHtmlRenderer {
    fn name(&self) -> &str {
        "c"
    }

    fn element(&self, element: &Element, options: &RenderOptions) -> String {
        let html = html_element(element, options);
        match element.selector() {
            Some(selector) => format!("<!-- {selector} -->\n{html}\n<!-- /{selector} -->"),
            None => html,
        }
    }
}

fn html_element(element: &Element, options: &RenderOptions) -> String {
    let mut out = format!("<{}", element.name);
    if let Some(id) = &element.id {
        out.push_str(&format!(" id=\"{id}\""));
    }
    if !element.classes.is_empty() {
        out.push_str(&format!(
            " {}=\"{}\"",
            options.class_attribute_name,
            element.classes.join(" ")
        ));
    }
    for (key, value) in &element.attributes {
        out.push_str(&format!(" {key}=\"{value}\""));
    }

    if element.is_self_closing() {
        out.push_str(options.self_closing_style.terminator());
        return out;
    }
    out.push('>');

    let parts = [&element.text, &element.content];
    if element.is_block() {
        let unit = options.indent_unit();
        for part in parts.into_iter().flatten() {
            out.push_str(&indent(part, &unit));
        }
        out.push('\n');
    } else {
        for part in parts.into_iter().flatten() {
            out.push_str(part);
        }
    }
    out.push_str(&format!("</{}>", element.name));
    out
}

//! HAML: `%tag#id.class{:key => "value"}` with nested content indented below.

use super::{indent, Element, MarkupRenderer};
use crate::options::RenderOptions;
use once_cell::sync::Lazy;
use regex::Regex;

/// Attribute names usable as Ruby symbols without quoting.
static SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());

pub struct HamlRenderer;

impl MarkupRenderer for HamlRenderer {
    fn name(&self) -> &str {
        "haml"
    }

    fn element(&self, element: &Element, options: &RenderOptions) -> String {
        let mut out = String::new();
        // `%div` is implied by a leading `#id` or `.class`.
        if element.name != "div" || element.selector().is_none() {
            out.push('%');
            out.push_str(&element.name);
        }
        if let Some(id) = &element.id {
            out.push('#');
            out.push_str(id);
        }
        for class in &element.classes {
            out.push('.');
            out.push_str(class);
        }
        if !element.attributes.is_empty() {
            let pairs: Vec<String> = element
                .attributes
                .iter()
                .map(|(key, value)| format!("{} => \"{value}\"", attribute_key(key)))
                .collect();
            out.push_str(&format!("{{{}}}", pairs.join(", ")));
        }
        if element.is_self_closing() {
            out.push('/');
            return out;
        }
        let unit = options.indent_unit();
        for part in [&element.text, &element.content].into_iter().flatten() {
            out.push_str(&indent(part, &unit));
        }
        out
    }
}

fn attribute_key(key: &str) -> String {
    if SYMBOL.is_match(key) {
        format!(":{key}")
    } else {
        format!("\"{key}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::element;
    use crate::tables::TagSettings;

    #[test]
    fn div_with_selector_is_implicit() {
        let mut div = element("div");
        div.classes = vec!["a".into(), "b".into()];
        assert_eq!(HamlRenderer.element(&div, &RenderOptions::default()), ".a.b");
        let plain = element("div");
        assert_eq!(HamlRenderer.element(&plain, &RenderOptions::default()), "%div");
    }

    #[test]
    fn attributes_and_text() {
        let mut a = element("a");
        a.attributes = vec![("href".into(), "/".into()), ("data-x".into(), "1".into())];
        a.text = Some("home".into());
        assert_eq!(
            HamlRenderer.element(&a, &RenderOptions::default()),
            "%a{:href => \"/\", \"data-x\" => \"1\"}\n    home"
        );
    }

    #[test]
    fn void_tag_gets_a_slash() {
        let mut br = element("br");
        br.settings = TagSettings::self_closing();
        assert_eq!(HamlRenderer.element(&br, &RenderOptions::default()), "%br/");
    }
}

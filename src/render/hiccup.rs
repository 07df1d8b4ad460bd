//! Hiccup: Clojure vectors, `[:tag#id.class {:key "value"} "text" content]`.

use super::{indent, Element, MarkupRenderer};
use crate::options::RenderOptions;

pub struct HiccupRenderer;

impl MarkupRenderer for HiccupRenderer {
    fn name(&self) -> &str {
        "hic"
    }

    fn element(&self, element: &Element, options: &RenderOptions) -> String {
        let mut out = format!("[:{}", element.name);
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
                .map(|(key, value)| format!(":{key} {}", quote(value)))
                .collect();
            out.push_str(&format!(" {{{}}}", pairs.join(", ")));
        }

        let block = element.is_block();
        let unit = options.indent_unit();
        let text = element.text.as_deref().map(quote);
        for part in [text.as_ref(), element.content.as_ref()].into_iter().flatten() {
            if block {
                out.push_str(&indent(part, &unit));
            } else {
                out.push(' ');
                out.push_str(part);
            }
        }
        out.push(']');
        out
    }

    fn text(&self, text: &str) -> String {
        quote(text)
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::element;

    #[test]
    fn selector_attributes_and_text() {
        let mut a = element("a");
        a.id = Some("top".into());
        a.classes = vec!["nav".into()];
        a.attributes = vec![("href".into(), "/".into())];
        a.text = Some("say \"hi\"".into());
        assert_eq!(
            HiccupRenderer.element(&a, &RenderOptions::default()),
            r#"[:a#top.nav {:href "/"} "say \"hi\""]"#
        );
    }

    #[test]
    fn multiline_content_goes_below() {
        let mut ul = element("ul");
        ul.content = Some("[:li]\n[:li]".into());
        assert_eq!(
            HiccupRenderer.element(&ul, &RenderOptions::default()),
            "[:ul\n    [:li]\n    [:li]]"
        );
    }

    #[test]
    fn text_nodes_are_strings() {
        assert_eq!(HiccupRenderer.text("x"), "\"x\"");
    }
}

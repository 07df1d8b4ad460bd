//! Per-call rendering options.

use serde::{Deserialize, Serialize};

/// Which markup renderer runs when the abbreviation names no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    #[default]
    Html,
    CommentedHtml,
    Haml,
    Hiccup,
}

impl Dialect {
    /// The `|name` filter that selects this dialect.
    pub fn filter_name(self) -> &'static str {
        match self {
            Dialect::Html => "html",
            Dialect::CommentedHtml => "c",
            Dialect::Haml => "haml",
            Dialect::Hiccup => "hic",
        }
    }

    /// Dialects sharing one snippet table key on this value.
    pub fn snippet_family(self) -> Dialect {
        match self {
            Dialect::CommentedHtml => Dialect::Html,
            other => other,
        }
    }
}

/// CSS flavour: braces and semicolons, or indentation-significant (Sass).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CssSyntax {
    #[default]
    Standard,
    Indented,
}

/// How self-closing tags are terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelfClosingStyle {
    /// `<br />`
    SpaceSlash,
    /// `<br/>`
    #[default]
    Slash,
    /// `<br>`
    Bare,
}

impl SelfClosingStyle {
    pub fn terminator(self) -> &'static str {
        match self {
            SelfClosingStyle::SpaceSlash => " />",
            SelfClosingStyle::Slash => "/>",
            SelfClosingStyle::Bare => ">",
        }
    }
}

/// Options supplied with every expansion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub output_dialect: Dialect,
    pub css_syntax: CssSyntax,
    /// `class` for HTML, `className` for JSX.
    pub class_attribute_name: String,
    pub self_closing_style: SelfClosingStyle,
    /// Spaces per block indentation level.
    pub indentation: usize,
    /// Extension of the document being edited, used to pick default filters.
    pub document_extension: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dialect: Dialect::Html,
            css_syntax: CssSyntax::Standard,
            class_attribute_name: "class".to_string(),
            self_closing_style: SelfClosingStyle::Slash,
            indentation: 4,
            document_extension: None,
        }
    }
}

impl RenderOptions {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.output_dialect = dialect;
        self
    }

    pub fn with_css_syntax(mut self, syntax: CssSyntax) -> Self {
        self.css_syntax = syntax;
        self
    }

    pub fn with_class_attribute(mut self, name: impl Into<String>) -> Self {
        self.class_attribute_name = name.into();
        self
    }

    pub fn with_self_closing_style(mut self, style: SelfClosingStyle) -> Self {
        self.self_closing_style = style;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.document_extension = Some(extension.into());
        self
    }

    pub(crate) fn indent_unit(&self) -> String {
        " ".repeat(self.indentation)
    }
}

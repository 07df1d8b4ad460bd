//! Tag snippets: markup that replaces a tag outright (`!!!` -> `<!doctype html>`).
//!
//! Content is spliced in at the `${child}` marker, or appended when the snippet
//! has none. `|` cursor marks are dropped.

const CHILD: &str = "${child}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSnippet {
    before: String,
    after: String,
    /// Leading whitespace of the line holding the child marker.
    indent: String,
}

impl MarkupSnippet {
    pub fn compile(source: &str) -> Self {
        let source = source.replace('|', "");
        match source.split_once(CHILD) {
            Some((before, after)) => {
                let line = &before[before.rfind('\n').map_or(0, |i| i + 1)..];
                let indent = &line[..line.len() - line.trim_start().len()];
                Self {
                    before: before.to_string(),
                    after: after.to_string(),
                    indent: indent.to_string(),
                }
            }
            None => Self {
                before: source,
                after: String::new(),
                indent: String::new(),
            },
        }
    }

    pub fn apply(&self, content: &str) -> String {
        let content = if self.indent.is_empty() {
            content.to_string()
        } else {
            content.replace('\n', &format!("\n{}", self.indent))
        };
        format!("{}{content}{}", self.before, self.after)
    }
}

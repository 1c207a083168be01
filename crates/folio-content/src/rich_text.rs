//! Rich-text documents and their HTML rendering.
//!
//! The store delivers descriptions as a tree of nodes (`nodeType`,
//! `content`, `value`, `marks`, `data`). The tree is kept as received and
//! converted to HTML only when a page is rendered.

use serde::{Deserialize, Serialize};

/// Root of a rich-text tree. Always has `nodeType: "document"`.
pub type RichTextDocument = RichTextNode;

/// One node of a rich-text tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextNode {
    pub node_type: String,

    #[serde(default)]
    pub content: Vec<RichTextNode>,

    /// Text of a `text` node
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub marks: Vec<Mark>,

    /// Node-specific payload, e.g. `uri` for hyperlinks
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Inline formatting applied to a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
}

impl RichTextNode {
    /// A `text` node with the given marks.
    pub fn text(value: impl Into<String>, marks: &[&str]) -> Self {
        Self {
            node_type: "text".to_string(),
            value: Some(value.into()),
            marks: marks
                .iter()
                .map(|m| Mark {
                    kind: m.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    /// A container node of `node_type` wrapping `content`.
    pub fn block(node_type: &str, content: Vec<RichTextNode>) -> Self {
        Self {
            node_type: node_type.to_string(),
            content,
            ..Default::default()
        }
    }

    fn uri(&self) -> Option<&str> {
        self.data.get("uri").and_then(|v| v.as_str())
    }
}

/// Errors from rendering a rich-text tree.
#[derive(Debug, thiserror::Error)]
pub enum RichTextError {
    #[error("Expected a document node at the root, found '{0}'")]
    NotADocument(String),
}

/// Render a document to HTML.
///
/// Unknown block types render their children. Embedded entries and assets
/// carry only link ids and are skipped.
pub fn render_document(doc: &RichTextDocument) -> Result<String, RichTextError> {
    if doc.node_type != "document" {
        return Err(RichTextError::NotADocument(doc.node_type.clone()));
    }

    let mut out = String::new();
    render_children(&doc.content, &mut out);
    Ok(out)
}

fn render_children(nodes: &[RichTextNode], out: &mut String) {
    for node in nodes {
        render_node(node, out);
    }
}

fn render_node(node: &RichTextNode, out: &mut String) {
    let tag = match node.node_type.as_str() {
        "text" => {
            render_text(node, out);
            return;
        }
        "hr" => {
            out.push_str("<hr/>");
            return;
        }
        "hyperlink" => {
            out.push_str("<a href=\"");
            out.push_str(&escape_html(node.uri().unwrap_or("#")));
            out.push_str("\">");
            render_children(&node.content, out);
            out.push_str("</a>");
            return;
        }
        "embedded-entry-block" | "embedded-entry-inline" | "embedded-asset-block" => return,
        "paragraph" => "p",
        "heading-1" => "h1",
        "heading-2" => "h2",
        "heading-3" => "h3",
        "heading-4" => "h4",
        "heading-5" => "h5",
        "heading-6" => "h6",
        "unordered-list" => "ul",
        "ordered-list" => "ol",
        "list-item" => "li",
        "blockquote" => "blockquote",
        "table" => "table",
        "table-row" => "tr",
        "table-cell" => "td",
        "table-header-cell" => "th",
        _ => {
            // entry-hyperlink, asset-hyperlink and future node types
            render_children(&node.content, out);
            return;
        }
    };

    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_children(&node.content, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_text(node: &RichTextNode, out: &mut String) {
    let value = node.value.as_deref().unwrap_or_default();

    let tags: Vec<&str> = node
        .marks
        .iter()
        .filter_map(|m| match m.kind.as_str() {
            "bold" => Some("b"),
            "italic" => Some("i"),
            "underline" => Some("u"),
            "code" => Some("code"),
            "superscript" => Some("sup"),
            "subscript" => Some("sub"),
            _ => None,
        })
        .collect();

    for tag in &tags {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }

    let mut lines = value.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(&escape_html(first));
    }
    for line in lines {
        out.push_str("<br/>");
        out.push_str(&escape_html(line));
    }

    for tag in tags.iter().rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(content: Vec<RichTextNode>) -> RichTextDocument {
        RichTextNode::block("document", content)
    }

    #[test]
    fn renders_paragraph_with_marks() {
        let d = doc(vec![RichTextNode::block(
            "paragraph",
            vec![
                RichTextNode::text("Built with ", &[]),
                RichTextNode::text("Rust", &["bold", "italic"]),
            ],
        )]);

        assert_eq!(
            render_document(&d).unwrap(),
            "<p>Built with <b><i>Rust</i></b></p>"
        );
    }

    #[test]
    fn renders_from_store_json() {
        let d: RichTextDocument = serde_json::from_value(json!({
            "nodeType": "document",
            "data": {},
            "content": [
                { "nodeType": "heading-2", "data": {}, "content": [
                    { "nodeType": "text", "value": "Overview", "marks": [], "data": {} }
                ] },
                { "nodeType": "unordered-list", "data": {}, "content": [
                    { "nodeType": "list-item", "data": {}, "content": [
                        { "nodeType": "paragraph", "data": {}, "content": [
                            { "nodeType": "text", "value": "Fast", "marks": [], "data": {} }
                        ] }
                    ] }
                ] },
                { "nodeType": "hr", "data": {}, "content": [] },
                { "nodeType": "paragraph", "data": {}, "content": [
                    { "nodeType": "hyperlink", "data": { "uri": "https://example.com" }, "content": [
                        { "nodeType": "text", "value": "site", "marks": [], "data": {} }
                    ] }
                ] }
            ]
        }))
        .unwrap();

        assert_eq!(
            render_document(&d).unwrap(),
            "<h2>Overview</h2><ul><li><p>Fast</p></li></ul><hr/>\
             <p><a href=\"https://example.com\">site</a></p>"
        );
    }

    #[test]
    fn escapes_text() {
        let d = doc(vec![RichTextNode::block(
            "paragraph",
            vec![RichTextNode::text("<script>alert('x')</script> & more", &[])],
        )]);

        let html = render_document(&d).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; more"));
    }

    #[test]
    fn converts_newlines_to_breaks() {
        let d = doc(vec![RichTextNode::block(
            "paragraph",
            vec![RichTextNode::text("one\ntwo", &[])],
        )]);
        assert_eq!(render_document(&d).unwrap(), "<p>one<br/>two</p>");
    }

    #[test]
    fn skips_embedded_entries() {
        let d = doc(vec![
            RichTextNode::block("embedded-entry-block", vec![]),
            RichTextNode::block("paragraph", vec![RichTextNode::text("kept", &[])]),
        ]);
        assert_eq!(render_document(&d).unwrap(), "<p>kept</p>");
    }

    #[test]
    fn rejects_non_document_root() {
        let err = render_document(&RichTextNode::block("paragraph", vec![])).unwrap_err();
        assert!(matches!(err, RichTextError::NotADocument(t) if t == "paragraph"));
    }
}

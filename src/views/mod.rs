/// UI tree and HTML output
mod pages;

pub use pages::{document, render_detail_view, render_search_view};

use crate::utils::escape_html;

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "input", "meta", "br"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Build an element node.
pub fn el<I>(tag: &'static str, attrs: &[(&'static str, &str)], children: I) -> Node
where
    I: IntoIterator<Item = Node>,
{
    Node::Element(Element {
        tag,
        attrs: attrs.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        children: children.into_iter().collect(),
    })
}

pub fn text(s: impl Into<String>) -> Node {
    Node::Text(s.into())
}

impl Node {
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(&escape_html(s)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(e.tag);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
impl Node {
    /// Concatenated text of this node and everything below it
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(s) => s.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }

    fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.as_element()?
            .attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn children(&self) -> &[Node] {
        self.as_element().map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// All descendants (and self) matching `pred`, in document order
    pub(crate) fn find_all(&self, pred: &dyn Fn(&Node) -> bool) -> Vec<&Node> {
        let mut found = Vec::new();
        if pred(self) {
            found.push(self);
        }
        for child in self.children() {
            found.extend(child.find_all(pred));
        }
        found
    }

    pub(crate) fn by_class(&self, class: &str) -> Vec<&Node> {
        self.find_all(&|n| n.attr("class") == Some(class))
    }

    pub(crate) fn by_tag(&self, tag: &str) -> Vec<&Node> {
        self.find_all(&|n| n.as_element().map(|e| e.tag) == Some(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let node = el(
            "a",
            &[("href", "/?id=a&b")],
            [text("<script>alert(1)</script>")],
        );
        assert_eq!(
            node.to_html(),
            "<a href=\"/?id=a&amp;b\">&lt;script&gt;alert(1)&lt;/script&gt;</a>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node = el("p", &[], [el("img", &[("src", "x.png")], []), text("after")]);
        assert_eq!(node.to_html(), "<p><img src=\"x.png\">after</p>");
    }

    #[test]
    fn test_text_content_concatenates() {
        let node = el("div", &[], [el("h3", &[], [text("Status: "), text("Go")])]);
        assert_eq!(node.text_content(), "Status: Go");
        assert_eq!(node.by_tag("h3").len(), 1);
    }
}

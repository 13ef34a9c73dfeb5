//! A small owned DOM used as the rendering target.
//!
//! Host pages are parsed with `scraper` and converted into this tree so that
//! renderers can mutate it freely; `to_html` serializes it back.

use crate::{Error, Result};
use scraper::Html;

/// Built-in host page carrying every placeholder the renderers expect.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Portfolio</title>
<link rel="stylesheet" href="style.css">
</head>
<body>
<header>
<h1 id="name"></h1>
<p id="tagline" class="muted"></p>
<p id="current"></p>
<p id="location" class="muted"></p>
</header>
<main>
<section><h2>About</h2><div id="about"></div></section>
<section><h2>Links</h2><div id="links" class="links"></div></section>
<section><h2>Skills</h2><div id="skills" class="chips"></div></section>
<section><h2>Projects</h2><div id="projects" class="projects"></div></section>
</main>
<footer><span>&copy; <span id="year"></span></span></footer>
</body>
</html>
"#;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "xmp", "iframe", "noembed", "noframes",
];

/// A node in the tree: either an element or a run of text
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Construct a new, unattached element.
///
/// `attrs` are applied in order. Two keys are handled specially: `class`
/// sets the element class and `text` replaces the text content. Every other
/// key becomes a plain attribute. `children` are appended after the text.
///
/// ```
/// use folio::dom::el;
///
/// let a = el("a", &[("class", "btn"), ("href", "/cv.pdf"), ("text", "CV")], vec![]);
/// assert_eq!(a.to_html(), r#"<a class="btn" href="/cv.pdf">CV</a>"#);
/// ```
pub fn el(tag: &str, attrs: &[(&str, &str)], children: Vec<Node>) -> Element {
    let mut node = Element::new(tag);
    for (k, v) in attrs {
        match *k {
            "class" => node.set_class_name(v),
            "text" => node.set_text_content(v),
            _ => node.set_attr(k, v),
        }
    }
    for child in children {
        node.append(child);
    }
    node
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn class_name(&self) -> &str {
        self.attr("class").unwrap_or("")
    }

    pub fn set_class_name(&mut self, class: &str) {
        self.set_attr("class", class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct element children, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Remove every child
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|e| e.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.attr("id") == Some(id) {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if let Some(found) = e.find_by_id_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.tag == tag {
            return Some(self);
        }
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if let Some(found) = e.find_by_tag_mut(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// All descendants (excluding self) with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_tag(tag, &mut out);
        out
    }

    fn collect_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        for e in self.child_elements() {
            if e.tag == tag {
                out.push(e);
            }
            e.collect_tag(tag, out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            push_escaped(out, v, true);
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        let raw = RAW_TEXT_ELEMENTS.contains(&self.tag.as_str());
        for child in &self.children {
            match child {
                Node::Text(t) if raw => out.push_str(t),
                Node::Text(t) => push_escaped(out, t, false),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_escaped(out: &mut String, s: &str, in_attr: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// A whole host page
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse a host page. Comments and the doctype are dropped; attributes
    /// are stored sorted by name so serialization is deterministic.
    pub fn parse(html: &str) -> Result<Self> {
        let parsed = Html::parse_document(html);
        let root = convert_element(parsed.root_element());
        if root.tag != "html" {
            return Err(Error::RenderError(format!(
                "expected <html> root, found <{}>",
                root.tag
            )));
        }
        Ok(Self { root })
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find_by_id(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_by_id_mut(id)
    }

    pub fn body(&self) -> Option<&Element> {
        self.root.child_elements().find(|e| e.tag == "body")
    }

    pub fn body_mut(&mut self) -> Option<&mut Element> {
        self.root.find_by_tag_mut("body")
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        self.root.write_html(&mut out);
        out.push('\n');
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::parse(DEFAULT_TEMPLATE).unwrap_or_else(|_| Self {
            root: el("html", &[], vec![el("head", &[], vec![]).into(), el("body", &[], vec![]).into()]),
        })
    }
}

fn convert_element(elem: scraper::ElementRef<'_>) -> Element {
    let value = elem.value();
    let mut attrs: Vec<(String, String)> = value
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    attrs.sort();

    let mut out = Element {
        tag: value.name().to_ascii_lowercase(),
        attrs,
        children: Vec::new(),
    };
    for child in elem.children() {
        match child.value() {
            scraper::Node::Text(t) => out.children.push(Node::Text(String::from(&**t))),
            scraper::Node::Element(_) => {
                if let Some(e) = scraper::ElementRef::wrap(child) {
                    out.children.push(Node::Element(convert_element(e)));
                }
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn el_applies_pseudo_keys() {
        let n = el("span", &[("class", "chip"), ("text", "Rust")], vec![]);
        assert_eq!(n.tag(), "span");
        assert_eq!(n.class_name(), "chip");
        assert_eq!(n.text_content(), "Rust");
        assert!(n.attr("text").is_none());
    }

    #[test]
    fn el_appends_children_after_text() {
        let n = el(
            "div",
            &[("text", "a")],
            vec![el("b", &[("text", "b")], vec![]).into()],
        );
        assert_eq!(n.to_html(), "<div>a<b>b</b></div>");
    }

    #[test]
    fn serialization_escapes_text_and_attributes() {
        let n = el("a", &[("title", "\"x\" & y"), ("text", "<b>")], vec![]);
        assert_eq!(n.to_html(), r#"<a title="&quot;x&quot; &amp; y">&lt;b&gt;</a>"#);
    }

    #[test]
    fn void_elements_have_no_close_tag() {
        let n = el("img", &[("src", "a.svg"), ("alt", "")], vec![]);
        assert_eq!(n.to_html(), r#"<img src="a.svg" alt="">"#);
    }

    #[test]
    fn default_template_has_every_placeholder() {
        let doc = Document::default();
        for id in [
            "name", "tagline", "current", "location", "about", "links", "skills", "projects",
            "year",
        ] {
            assert!(doc.get_element_by_id(id).is_some(), "missing #{}", id);
        }
        assert!(doc.body().is_some());
    }

    #[test]
    fn parse_then_serialize_keeps_structure() {
        let doc = Document::parse(
            "<html><head><style>a > b {}</style></head><body><p id=x class=y>Hi &amp; bye</p></body></html>",
        )
        .unwrap();
        let html = doc.to_html();
        assert!(html.contains(r#"<p class="y" id="x">Hi &amp; bye</p>"#));
        assert!(html.contains("<style>a > b {}</style>"));
    }

    #[test]
    fn raw_text_elements_are_not_escaped() {
        let doc = Document::parse(
            "<html><head></head><body><noscript><p>enable JS & reload</p></noscript><xmp>a < b</xmp></body></html>",
        )
        .unwrap();
        let html = doc.to_html();
        assert!(html.contains("<noscript><p>enable JS & reload</p></noscript>"));
        assert!(html.contains("<xmp>a < b</xmp>"));
    }

    #[test]
    fn set_text_content_replaces_children() {
        let mut doc = Document::default();
        let about = doc.get_element_by_id_mut("about").unwrap();
        about.append(el("p", &[("text", "old")], vec![]));
        about.set_text_content("new");
        assert_eq!(about.children().len(), 1);
        about.set_text_content("");
        assert!(about.children().is_empty());
    }
}

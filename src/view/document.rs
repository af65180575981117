use super::{escape_html, Element, ElementId, Marker, Node, View, ViewError};
use crate::config::selectors;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
enum Slot {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: Vec<ElementId>,
}

impl ElementData {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// In-memory document tree rooted at `<body>`.
///
/// Slots are never reused, so an [`ElementId`] for a removed element keeps
/// reporting [`ViewError::StaleElement`] instead of aliasing a newer node.
#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    slots: Vec<Option<Slot>>,
    body: ElementId,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        let body = ElementData {
            tag: "body".to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        };
        Self {
            title: title.into(),
            slots: vec![Some(Slot::Element(body))],
            body: ElementId(0),
        }
    }

    /// The host page: a header carrying the theme control and an empty
    /// projects container.
    pub fn portfolio_shell(title: impl Into<String>) -> Self {
        let title = title.into();
        let mut document = Self::new(title.clone());
        let header = Element::new(selectors::HEADER_TAG)
            .with_child(Element::new("h1").with_text(title))
            .with_child(
                Element::new("button")
                    .with_id(selectors::THEME_TOGGLE_ID)
                    .with_attribute("type", "button")
                    .with_text("Toggle Dark Mode"),
            );
        let main = Element::new("main").with_child(
            Element::new("section")
                .with_id("projects")
                .with_child(Element::new("h2").with_text("My Projects"))
                .with_child(Element::new("div").with_id(selectors::PROJECTS_CONTAINER_ID)),
        );

        let body = document.body;
        document.attach(body, header.into());
        document.attach(body, main.into());
        document
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    #[cfg(test)]
    pub fn append(&mut self, parent: ElementId, node: Node) -> Result<ElementId, ViewError> {
        self.element(parent)?;
        Ok(self.attach(parent, node))
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id)
            .map(|data| data.classes.iter().any(|existing| existing == class))
            .unwrap_or(false)
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|data| data.attribute(name))
    }

    /// Child elements of `id`, skipping text nodes.
    pub fn child_elements(&self, id: ElementId) -> Vec<ElementId> {
        match self.element(id) {
            Ok(data) => data
                .children
                .iter()
                .copied()
                .filter(|child| matches!(self.slot(*child), Some(Slot::Element(_))))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Concatenated text of `id` and all of its descendants.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    /// Like [`View::find`] but limited to the subtree under `root` (inclusive).
    pub fn find_within(&self, root: ElementId, marker: Marker<'_>) -> Vec<ElementId> {
        let mut found = Vec::new();
        self.walk(root, &mut |id, data| {
            if self.matches(id, data, marker) {
                found.push(id);
            }
        });
        found
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.title));
        html.push_str("<link rel=\"stylesheet\" href=\"style.css\">\n</head>\n");
        self.write_node(self.body, &mut html);
        html.push_str("\n</html>\n");
        html
    }

    fn slot(&self, id: ElementId) -> Option<&Slot> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn element(&self, id: ElementId) -> Result<&ElementData, ViewError> {
        match self.slot(id) {
            Some(Slot::Element(data)) => Ok(data),
            Some(Slot::Text(_)) => Err(ViewError::NotAnElement(id)),
            None => Err(ViewError::StaleElement(id)),
        }
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut ElementData, ViewError> {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(Slot::Element(data)) => Ok(data),
            Some(Slot::Text(_)) => Err(ViewError::NotAnElement(id)),
            None => Err(ViewError::StaleElement(id)),
        }
    }

    /// Inserts `node` under `parent`. The caller has checked `parent` is a live element.
    fn attach(&mut self, parent: ElementId, node: Node) -> ElementId {
        let id = self.insert(node);
        if let Ok(data) = self.element_mut(parent) {
            data.children.push(id);
        }
        id
    }

    fn insert(&mut self, node: Node) -> ElementId {
        match node {
            Node::Text(text) => self.push_slot(Slot::Text(text)),
            Node::Element(element) => {
                let children = element
                    .children
                    .into_iter()
                    .map(|child| self.insert(child))
                    .collect();
                self.push_slot(Slot::Element(ElementData {
                    tag: element.tag,
                    classes: element.classes,
                    attributes: element.attributes,
                    children,
                }))
            }
        }
    }

    fn push_slot(&mut self, slot: Slot) -> ElementId {
        self.slots.push(Some(slot));
        ElementId(self.slots.len() - 1)
    }

    fn remove_subtree(&mut self, id: ElementId) {
        if let Some(Slot::Element(data)) = self.slots.get_mut(id.0).and_then(Option::take) {
            for child in data.children {
                self.remove_subtree(child);
            }
        }
    }

    fn walk<F>(&self, id: ElementId, visit: &mut F)
    where
        F: FnMut(ElementId, &ElementData),
    {
        if let Ok(data) = self.element(id) {
            visit(id, data);
            for child in &data.children {
                self.walk(*child, visit);
            }
        }
    }

    fn matches(&self, id: ElementId, data: &ElementData, marker: Marker<'_>) -> bool {
        match marker {
            Marker::Body => id == self.body,
            Marker::Id(wanted) => data.attribute("id") == Some(wanted),
            Marker::Tag(tag) => data.tag.eq_ignore_ascii_case(tag),
            Marker::Class(class) => data.classes.iter().any(|existing| existing == class),
        }
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        match self.slot(id) {
            Some(Slot::Text(text)) => out.push_str(text),
            Some(Slot::Element(data)) => {
                for child in &data.children {
                    self.collect_text(*child, out);
                }
            }
            None => {}
        }
    }

    fn write_node(&self, id: ElementId, out: &mut String) {
        match self.slot(id) {
            Some(Slot::Text(text)) => out.push_str(&escape_html(text)),
            Some(Slot::Element(data)) => {
                let _ = write!(out, "<{}", data.tag);
                if !data.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape_html(&data.classes.join(" ")));
                }
                for (name, value) in &data.attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
                }
                out.push('>');
                for child in &data.children {
                    self.write_node(*child, out);
                }
                let _ = write!(out, "</{}>", data.tag);
            }
            None => {}
        }
    }
}

impl View for Document {
    fn find(&self, marker: Marker<'_>) -> Vec<ElementId> {
        self.find_within(self.body, marker)
    }

    fn toggle_class(&mut self, element: ElementId, class: &str) -> Result<bool, ViewError> {
        let data = self.element_mut(element)?;
        if let Some(position) = data.classes.iter().position(|existing| existing == class) {
            data.classes.remove(position);
            Ok(false)
        } else {
            data.classes.push(class.to_string());
            Ok(true)
        }
    }

    fn set_contents(&mut self, container: ElementId, contents: Vec<Node>) -> Result<(), ViewError> {
        let previous = std::mem::take(&mut self.element_mut(container)?.children);
        for child in previous {
            self.remove_subtree(child);
        }
        for node in contents {
            self.attach(container, node);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_satisfies_page_contract() {
        let document = Document::portfolio_shell("Folio");
        assert!(document.find_first(Marker::Id(selectors::THEME_TOGGLE_ID)).is_ok());
        assert!(document.find_first(Marker::Id(selectors::PROJECTS_CONTAINER_ID)).is_ok());
        assert_eq!(document.find(Marker::Tag(selectors::HEADER_TAG)).len(), 1);
        assert_eq!(document.find(Marker::Body), vec![document.body()]);
    }

    #[test]
    fn replacing_contents_invalidates_old_children() {
        let mut document = Document::new("test");
        let body = document.body();
        let old = document
            .append(body, Element::new("p").with_class("old").into())
            .unwrap();

        document
            .set_contents(body, vec![Element::new("p").with_class("new").into()])
            .unwrap();

        assert!(document.find(Marker::Class("old")).is_empty());
        assert_eq!(document.find(Marker::Class("new")).len(), 1);
        assert_eq!(
            document.toggle_class(old, "dark-mode"),
            Err(ViewError::StaleElement(old))
        );
    }

    #[test]
    fn toggle_class_adds_then_removes() {
        let mut document = Document::new("test");
        let body = document.body();
        assert_eq!(document.toggle_class(body, "dark-mode"), Ok(true));
        assert!(document.has_class(body, "dark-mode"));
        assert_eq!(document.toggle_class(body, "dark-mode"), Ok(false));
        assert!(!document.has_class(body, "dark-mode"));
    }

    #[test]
    fn find_returns_document_order() {
        let mut document = Document::new("test");
        let body = document.body();
        let outer = Element::new("div")
            .with_class("card")
            .with_attribute("data-n", "1")
            .with_child(Element::new("div").with_class("card").with_attribute("data-n", "2"));
        document.append(body, outer.into()).unwrap();
        document
            .append(body, Element::new("div").with_class("card").with_attribute("data-n", "3").into())
            .unwrap();

        let order: Vec<_> = document
            .find(Marker::Class("card"))
            .into_iter()
            .filter_map(|id| document.attribute(id, "data-n").map(str::to_string))
            .collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn html_output_escapes_text_and_attributes() {
        let mut document = Document::new("A & B");
        let body = document.body();
        document
            .append(
                body,
                Element::new("a")
                    .with_attribute("href", "https://example.com/?a=1&b=\"2\"")
                    .with_text("<script>")
                    .into(),
            )
            .unwrap();

        let html = document.to_html();
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let mut document = Document::new("test");
        let body = document.body();
        let id = document
            .append(
                body,
                Element::new("p")
                    .with_text("Hello, ")
                    .with_child(Element::new("strong").with_text("world"))
                    .into(),
            )
            .unwrap();
        assert_eq!(document.text_content(id), "Hello, world");
        assert_eq!(document.child_elements(id).len(), 1);
    }
}

mod document;
mod node;

pub use document::Document;
pub use node::{escape_html, Element, Node};

use thiserror::Error;

/// Handle to an element owned by a [`View`]. Handles go stale once the
/// element is removed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

/// How an element is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    Body,
    Id(&'a str),
    Tag(&'a str),
    Class(&'a str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no element matches {0}")]
    MissingElement(String),
    #[error("element {0:?} is no longer attached to the document")]
    StaleElement(ElementId),
    #[error("element {0:?} is a text node")]
    NotAnElement(ElementId),
}

impl ViewError {
    pub fn missing(marker: Marker<'_>) -> Self {
        let description = match marker {
            Marker::Body => "<body>".to_string(),
            Marker::Id(id) => format!("#{id}"),
            Marker::Tag(tag) => format!("<{tag}>"),
            Marker::Class(class) => format!(".{class}"),
        };
        ViewError::MissingElement(description)
    }
}

/// The document capabilities the theme toggler and project renderer need.
pub trait View {
    /// Every attached element matching `marker`, in document order.
    fn find(&self, marker: Marker<'_>) -> Vec<ElementId>;

    /// Adds `class` when absent and removes it when present. Returns whether
    /// the class is present afterwards.
    fn toggle_class(&mut self, element: ElementId, class: &str) -> Result<bool, ViewError>;

    /// Replaces every child of `container` with `contents`.
    fn set_contents(&mut self, container: ElementId, contents: Vec<Node>) -> Result<(), ViewError>;

    fn find_first(&self, marker: Marker<'_>) -> Result<ElementId, ViewError> {
        self.find(marker)
            .into_iter()
            .next()
            .ok_or_else(|| ViewError::missing(marker))
    }
}

//! In-memory document used for tests and headless rendering.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::Document;

/// Handle to an element inside a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Default)]
struct Node {
    id: Option<String>,
    class: String,
    text: String,
    attributes: HashMap<String, String>,
}

/// A flat document: a root element with attributes plus a list of elements.
///
/// Elements are never removed, matching the contract that the page markup
/// owns element lifetimes. Text and class writes are counted.
///
/// # Example
///
/// ```rust
/// use tintage::{Document, MemoryDocument};
///
/// let doc = MemoryDocument::new();
/// let el = doc.add_element("age-mins");
/// doc.set_attribute(el, "data-ut", "1700000000");
///
/// assert_eq!(doc.elements_by_class("age-mins"), vec![el]);
/// assert_eq!(doc.attribute(&el, "data-ut").as_deref(), Some("1700000000"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocument {
    root: RefCell<HashMap<String, String>>,
    nodes: RefCell<Vec<Node>>,
    text_writes: Cell<usize>,
    class_writes: Cell<usize>,
}

impl MemoryDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element with the given class attribute.
    pub fn add_element(&self, class: &str) -> ElementId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            class: class.to_string(),
            ..Node::default()
        });
        ElementId(nodes.len() - 1)
    }

    /// Appends an element carrying an id.
    pub fn add_element_with_id(&self, id: &str) -> ElementId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            id: Some(id.to_string()),
            ..Node::default()
        });
        ElementId(nodes.len() - 1)
    }

    /// Appends an age label: a bucket class plus a timestamp attribute.
    pub fn add_age_element(&self, class: &str, attribute: &str, timestamp: i64) -> ElementId {
        let el = self.add_element(class);
        self.set_attribute(el, attribute, &timestamp.to_string());
        el
    }

    /// Sets an attribute on an element. Not counted as a write.
    pub fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Reads an attribute of the root element.
    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.root.borrow().get(name).cloned()
    }

    /// Number of text writes performed through [`Document::set_text`].
    pub fn text_writes(&self) -> usize {
        self.text_writes.get()
    }

    /// Number of class writes performed through [`Document::set_class_name`].
    pub fn class_writes(&self) -> usize {
        self.class_writes.get()
    }

    /// Total number of element writes.
    pub fn writes(&self) -> usize {
        self.text_writes() + self.class_writes()
    }
}

impl Document for MemoryDocument {
    type Element = ElementId;

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.root
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_root_attribute(&self, name: &str) {
        self.root.borrow_mut().remove(name);
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .borrow()
            .iter()
            .position(|node| node.id.as_deref() == Some(id))
            .map(ElementId)
    }

    fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.class.split_whitespace().any(|c| c == class))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(element.0)
            .and_then(|node| node.attributes.get(name).cloned())
    }

    fn text(&self, element: &ElementId) -> String {
        self.nodes
            .borrow()
            .get(element.0)
            .map(|node| node.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, element: &ElementId, text: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0) {
            node.text = text.to_string();
            self.text_writes.set(self.text_writes.get() + 1);
        }
    }

    fn class_name(&self, element: &ElementId) -> String {
        self.nodes
            .borrow()
            .get(element.0)
            .map(|node| node.class.clone())
            .unwrap_or_default()
    }

    fn set_class_name(&self, element: &ElementId, class: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.0) {
            node.class = class.to_string();
            self.class_writes.set(self.class_writes.get() + 1);
        }
    }
}

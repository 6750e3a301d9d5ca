//! Document capability.
//!
//! The controllers in this crate never touch a real DOM directly. They go
//! through [`Document`], which exposes exactly what they need:
//!
//! - an attribute on the root element (the active theme)
//! - lookup by id (the theme toggle) and by class (age labels)
//! - attribute reads, and text/class writes on found elements
//!
//! [`MemoryDocument`] implements it in memory and counts writes, so the
//! "no redundant writes" behavior of the age renderer can be asserted.
//! The browser implementation lives in `crate::web` behind the `web` feature.

mod memory;

pub use memory::{ElementId, MemoryDocument};

use std::rc::Rc;

/// Access to the parts of a page this crate reads and mutates.
///
/// Methods take `&self`: a page is a shared, interiorly mutable object and
/// the theme controller and age renderer may hold it at the same time.
pub trait Document {
    /// Handle to an element found in the document.
    type Element;

    /// Sets `name` on the root element.
    fn set_root_attribute(&self, name: &str, value: &str);

    /// Removes `name` from the root element.
    fn remove_root_attribute(&self, name: &str);

    /// Finds the element with the given id.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Returns a snapshot of all elements whose class list contains `class`.
    fn elements_by_class(&self, class: &str) -> Vec<Self::Element>;

    /// Reads an attribute of an element.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Returns the element's text content.
    fn text(&self, element: &Self::Element) -> String;

    /// Replaces the element's text content.
    fn set_text(&self, element: &Self::Element, text: &str);

    /// Returns the element's full class attribute.
    fn class_name(&self, element: &Self::Element) -> String;

    /// Replaces the element's full class attribute.
    fn set_class_name(&self, element: &Self::Element, class: &str);
}

impl<T: Document + ?Sized> Document for &T {
    type Element = T::Element;

    fn set_root_attribute(&self, name: &str, value: &str) {
        (**self).set_root_attribute(name, value)
    }

    fn remove_root_attribute(&self, name: &str) {
        (**self).remove_root_attribute(name)
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Element> {
        (**self).element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<Self::Element> {
        (**self).elements_by_class(class)
    }

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String> {
        (**self).attribute(element, name)
    }

    fn text(&self, element: &Self::Element) -> String {
        (**self).text(element)
    }

    fn set_text(&self, element: &Self::Element, text: &str) {
        (**self).set_text(element, text)
    }

    fn class_name(&self, element: &Self::Element) -> String {
        (**self).class_name(element)
    }

    fn set_class_name(&self, element: &Self::Element, class: &str) {
        (**self).set_class_name(element, class)
    }
}

impl<T: Document + ?Sized> Document for Rc<T> {
    type Element = T::Element;

    fn set_root_attribute(&self, name: &str, value: &str) {
        (**self).set_root_attribute(name, value)
    }

    fn remove_root_attribute(&self, name: &str) {
        (**self).remove_root_attribute(name)
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Element> {
        (**self).element_by_id(id)
    }

    fn elements_by_class(&self, class: &str) -> Vec<Self::Element> {
        (**self).elements_by_class(class)
    }

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String> {
        (**self).attribute(element, name)
    }

    fn text(&self, element: &Self::Element) -> String {
        (**self).text(element)
    }

    fn set_text(&self, element: &Self::Element, text: &str) {
        (**self).set_text(element, text)
    }

    fn class_name(&self, element: &Self::Element) -> String {
        (**self).class_name(element)
    }

    fn set_class_name(&self, element: &Self::Element, class: &str) {
        (**self).set_class_name(element, class)
    }
}

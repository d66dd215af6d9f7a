//! Document abstraction
//!
//! The controllers never touch a browser directly. A host implements
//! [`Document`] over whatever tree it owns (a wasm binding, a server-side
//! renderer, [`MemoryDocument`] in tests).

mod memory;

use std::fmt;

pub use memory::{MemoryDocument, MemoryElement, NodeId};

#[cfg(test)]
pub(crate) use memory::{password_form_document, FormNodes};

/// `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    Loading,
    Interactive,
    #[default]
    Complete,
}

impl ReadyState {
    pub fn is_loading(self) -> bool {
        self == ReadyState::Loading
    }
}

/// Values of the `display` style property the controllers write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

/// Priority argument of `style.setProperty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StylePriority {
    #[default]
    Normal,
    Important,
}

/// Read/write access to a host document.
///
/// Selectors passed to the query methods are simple: `#id`, `.class`,
/// `tag` or `tag[attr="value"]`.
pub trait Document {
    type Node: Clone + PartialEq + fmt::Debug;

    fn ready_state(&self) -> ReadyState;

    /// The `<html>` element.
    fn document_element(&self) -> Self::Node;

    fn body(&self) -> Option<Self::Node>;

    fn get_element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First match in document order.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// Every descendant of `scope` matching `selector`, in document order.
    fn query_selector_all_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Current value of a form control; empty for other elements.
    fn value(&self, node: &Self::Node) -> String;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn set_text_content(&mut self, node: &Self::Node, text: &str);

    fn set_disabled(&mut self, node: &Self::Node, disabled: bool);

    fn set_display(&mut self, node: &Self::Node, display: Display);

    fn set_style_property(
        &mut self,
        node: &Self::Node,
        property: &str,
        value: &str,
        priority: StylePriority,
    );

    /// Blocking user notification.
    fn alert(&mut self, message: &str);
}

//! In-memory document.

use std::collections::{BTreeMap, BTreeSet};

use super::{Display, Document, ReadyState, StylePriority};
use crate::cookie::CookieSource;

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Element description used to build a [`MemoryDocument`].
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    value: String,
    text: String,
    disabled: bool,
    display: Option<Display>,
    styles: BTreeMap<String, (String, StylePriority)>,
    children: Vec<NodeId>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self.attributes.get(name).map(String::as_str),
        }
    }
}

/// A [`Document`] and [`CookieSource`] backed by plain data.
///
/// Starts with an `<html>` root holding an empty `<body>`, ready state
/// `complete` and no cookies.
///
/// A [`NodeId`] this document never handed out reads as an empty element
/// and ignores writes. Only [`MemoryDocument::append`] panics on one.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    ready_state: ReadyState,
    cookies: String,
    alerts: Vec<String>,
}

const ROOT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut html = MemoryElement::new("html");
        html.children.push(BODY);
        Self {
            elements: vec![html, MemoryElement::new("body")],
            ready_state: ReadyState::Complete,
            cookies: String::new(),
            alerts: Vec::new(),
        }
    }

    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    /// Appends `element` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append(&mut self, parent: NodeId, element: MemoryElement) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    pub fn set_cookies(&mut self, cookies: &str) {
        self.cookies = cookies.to_string();
    }

    /// Simulates typing into a form control.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.value = value.to_string();
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.classes.contains(class))
    }

    pub fn text_content(&self, node: NodeId) -> &str {
        self.element(node).map_or("", |e| e.text.as_str())
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.disabled)
    }

    /// `None` until something sets the display property.
    pub fn display(&self, node: NodeId) -> Option<Display> {
        self.element(node).and_then(|e| e.display)
    }

    pub fn style_property(&self, node: NodeId, property: &str) -> Option<(&str, StylePriority)> {
        self.element(node)?
            .styles
            .get(property)
            .map(|(value, priority)| (value.as_str(), *priority))
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    fn element(&self, node: NodeId) -> Option<&MemoryElement> {
        self.elements.get(node.0)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut MemoryElement> {
        self.elements.get_mut(node.0)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map_or(&[], |e| e.children.as_slice())
    }

    /// Pre-order walk of the descendants of `scope`, excluding `scope`.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &Selector<'_>) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        match selector {
            Selector::Id(id) => element.id.as_deref() == Some(*id),
            Selector::Class(class) => element.classes.contains(*class),
            Selector::Tag { tag, attribute } => {
                let tag_ok = tag.is_empty() || element.tag.eq_ignore_ascii_case(tag);
                let attr_ok = attribute
                    .is_none_or(|(name, value)| element.attribute(name) == Some(value));
                tag_ok && attr_ok
            }
        }
    }
}

/// The selector forms the memory document understands.
#[derive(Debug, PartialEq)]
enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag {
        tag: &'a str,
        attribute: Option<(&'a str, &'a str)>,
    },
}

impl<'a> Selector<'a> {
    fn parse(input: &'a str) -> Option<Self> {
        let input = input.trim();
        if let Some(id) = input.strip_prefix('#') {
            return Some(Selector::Id(id));
        }
        if let Some(class) = input.strip_prefix('.') {
            return Some(Selector::Class(class));
        }
        match input.split_once('[') {
            None if input.is_empty() => None,
            None => Some(Selector::Tag { tag: input, attribute: None }),
            Some((tag, rest)) => {
                let inner = rest.strip_suffix(']')?;
                let (name, value) = inner.split_once('=')?;
                let value = value.trim_matches(|c| c == '"' || c == '\'');
                Some(Selector::Tag {
                    tag,
                    attribute: Some((name.trim(), value)),
                })
            }
        }
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn document_element(&self) -> NodeId {
        ROOT
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&format!("#{id}"))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        std::iter::once(ROOT)
            .chain(self.descendants(ROOT))
            .find(|node| self.matches(*node, &selector))
    }

    fn query_selector_all_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(*scope)
            .into_iter()
            .filter(|node| self.matches(*node, &selector))
            .collect()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.attribute(name).map(str::to_string)
    }

    fn value(&self, node: &NodeId) -> String {
        self.element(*node).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.element_mut(*node) {
            element.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.element_mut(*node) {
            element.classes.remove(class);
        }
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        let Some(element) = self.element_mut(*node) else {
            return;
        };
        match name {
            "id" => element.id = Some(value.to_string()),
            _ => {
                element.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        if let Some(element) = self.element_mut(*node) {
            element.text = text.to_string();
        }
    }

    fn set_disabled(&mut self, node: &NodeId, disabled: bool) {
        if let Some(element) = self.element_mut(*node) {
            element.disabled = disabled;
        }
    }

    fn set_display(&mut self, node: &NodeId, display: Display) {
        if let Some(element) = self.element_mut(*node) {
            element.display = Some(display);
        }
    }

    fn set_style_property(
        &mut self,
        node: &NodeId,
        property: &str,
        value: &str,
        priority: StylePriority,
    ) {
        if let Some(element) = self.element_mut(*node) {
            element
                .styles
                .insert(property.to_string(), (value.to_string(), priority));
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

impl CookieSource for MemoryDocument {
    fn cookie_header(&self) -> String {
        self.cookies.clone()
    }
}

/// Nodes of the password-change form built by [`password_form_document`].
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FormNodes {
    pub form: NodeId,
    pub password: NodeId,
    pub confirm: NodeId,
    pub requirements: NodeId,
    pub length: NodeId,
    pub lower: NodeId,
    pub upper: NodeId,
    pub special: NodeId,
    pub match_error: NodeId,
    pub submit: NodeId,
}

/// The markup of the account password-change page.
#[cfg(test)]
pub(crate) fn password_form_document() -> (MemoryDocument, FormNodes) {
    let mut doc = MemoryDocument::new();
    let body = doc.body_id();
    let form = doc.append(body, MemoryElement::new("form").with_id("password-form"));
    let password = doc.append(
        form,
        MemoryElement::new("input")
            .with_id("id_new_password1")
            .with_attribute("type", "password"),
    );
    let requirements = doc.append(form, MemoryElement::new("ul").with_id("requirements"));
    let item = |rule: &str| MemoryElement::new("li").with_attribute("data-check", rule);
    let length = doc.append(requirements, item("length"));
    let lower = doc.append(requirements, item("lower"));
    let upper = doc.append(requirements, item("upper"));
    let special = doc.append(requirements, item("special"));
    let confirm = doc.append(
        form,
        MemoryElement::new("input")
            .with_id("id_new_password2")
            .with_attribute("type", "password"),
    );
    let match_error = doc.append(form, MemoryElement::new("p").with_id("match-error"));
    let submit = doc.append(
        form,
        MemoryElement::new("button").with_attribute("type", "submit"),
    );
    let nodes = FormNodes {
        form,
        password,
        confirm,
        requirements,
        length,
        lower,
        upper,
        special,
        match_error,
        submit,
    };
    (doc, nodes)
}

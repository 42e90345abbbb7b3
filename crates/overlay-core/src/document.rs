#![forbid(unsafe_code)]

//! Headless element tree implementing [`FocusHost`].
//!
//! `MemoryDocument` models just enough of a document to drive the focus
//! trap: a tree of nodes with a tag kind and the attributes that decide
//! focusability, plus a single active element.
//!
//! # Focusable selector set
//!
//! A node is *tabbable* (part of sequential Tab order) when it is attached,
//! not disabled, not hidden, its `tabindex` is absent or non-negative, and
//! one of the following holds:
//!
//! | Rule | Example |
//! |------|---------|
//! | interactive tag | `button`, `input`, `select`, `textarea` |
//! | anchor with href | `<a href="...">` |
//! | explicit tabindex ≥ 0 | `<div tabindex="0">` |
//! | content-editable | `<div contenteditable>` |
//!
//! A node with `tabindex = -1` is never tabbable but can still receive
//! programmatic focus; this is how overlay roots act as a focus sink.
//!
//! # Failure Modes
//!
//! - Appending under an unknown parent creates a detached node.
//! - `remove()` of the focused subtree clears the active element.
//! - Focus calls on unknown, detached, disabled, or hidden nodes return
//!   `false` and leave focus unchanged.

use ahash::AHashMap;

use crate::element::{ElementId, FocusHost};

/// Tag kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Generic container (`div`, `section`, ...).
    #[default]
    Container,
    Button,
    Input,
    Select,
    TextArea,
    /// Anchor element; tabbable only with an `href`.
    Link,
    /// Non-interactive text.
    Text,
}

impl NodeKind {
    const fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Input | Self::Select | Self::TextArea
        )
    }
}

/// Attributes of a node to be inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub href: bool,
    pub tab_index: Option<i32>,
    pub content_editable: bool,
    pub disabled: bool,
    pub hidden: bool,
    pub autofocus: bool,
}

impl NodeSpec {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn container() -> Self {
        Self::new(NodeKind::Container)
    }

    #[must_use]
    pub fn button() -> Self {
        Self::new(NodeKind::Button)
    }

    #[must_use]
    pub fn input() -> Self {
        Self::new(NodeKind::Input)
    }

    /// An anchor carrying an `href`.
    #[must_use]
    pub fn link() -> Self {
        Self::new(NodeKind::Link).href(true)
    }

    #[must_use]
    pub fn href(mut self, href: bool) -> Self {
        self.href = href;
        self
    }

    #[must_use]
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }

    #[must_use]
    pub fn content_editable(mut self, editable: bool) -> Self {
        self.content_editable = editable;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    fn is_tabbable(&self) -> bool {
        if self.disabled || self.hidden {
            return false;
        }
        match self.tab_index {
            Some(index) if index < 0 => false,
            Some(_) => true,
            None => {
                self.kind.is_interactive()
                    || (self.kind == NodeKind::Link && self.href)
                    || self.content_editable
            }
        }
    }

    fn accepts_programmatic_focus(&self) -> bool {
        !self.disabled && !self.hidden && (self.is_tabbable() || self.tab_index.is_some())
    }
}

#[derive(Debug, Clone)]
struct Node {
    spec: NodeSpec,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// An in-memory element tree with a single focused element.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: AHashMap<ElementId, Node>,
    body: ElementId,
    active: Option<ElementId>,
    next_id: u64,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document containing only a body element.
    #[must_use]
    pub fn new() -> Self {
        let body = ElementId::new(0);
        let mut nodes = AHashMap::new();
        nodes.insert(
            body,
            Node {
                spec: NodeSpec::container(),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            body,
            active: None,
            next_id: 1,
        }
    }

    /// The document body.
    #[must_use]
    pub const fn body(&self) -> ElementId {
        self.body
    }

    /// Append a node as the last child of `parent`.
    ///
    /// If `parent` is not in the document the node is created detached.
    pub fn append(&mut self, parent: ElementId, spec: NodeSpec) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;

        let parent = match self.nodes.get_mut(&parent) {
            Some(node) => {
                node.children.push(id);
                Some(parent)
            }
            None => None,
        };
        self.nodes.insert(
            id,
            Node {
                spec,
                parent,
                children: Vec::new(),
            },
        );
        id
    }

    /// Remove `id` and its whole subtree.
    ///
    /// Returns `false` if `id` is unknown or is the body.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.body || !self.nodes.contains_key(&id) {
            return false;
        }
        if let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent)
            && let Some(parent) = self.nodes.get_mut(&parent)
        {
            parent.children.retain(|&child| child != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
            }
            if self.active == Some(next) {
                self.active = None;
            }
        }
        true
    }

    /// Toggle the `disabled` attribute. Returns `false` for unknown nodes.
    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.spec.disabled = disabled;
                true
            }
            None => false,
        }
    }

    /// Attributes of `id`, if present.
    #[must_use]
    pub fn spec(&self, id: ElementId) -> Option<&NodeSpec> {
        self.nodes.get(&id).map(|n| &n.spec)
    }

    /// Number of nodes, including the body.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Descendants of `root` in pre-order, excluding `root`.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let Some(node) = self.nodes.get(&root) else {
            return out;
        };
        let mut stack: Vec<ElementId> = node.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}

impl FocusHost for MemoryDocument {
    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, id: ElementId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let accepts = self
            .nodes
            .get(&id)
            .is_some_and(|n| n.spec.accepts_programmatic_focus());
        if accepts {
            #[cfg(feature = "tracing")]
            tracing::trace!(element = id.get(), "memory document focus");
            self.active = Some(id);
        }
        accepts
    }

    fn blur(&mut self) {
        self.active = None;
    }

    fn is_attached(&self, id: ElementId) -> bool {
        let mut cursor = id;
        loop {
            if cursor == self.body {
                return true;
            }
            match self.nodes.get(&cursor).and_then(|n| n.parent) {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
    }

    fn focusable_within(&self, root: ElementId) -> Vec<ElementId> {
        if !self.is_attached(root) {
            return Vec::new();
        }
        self.descendants(root)
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(|n| n.spec.is_tabbable()))
            .collect()
    }

    fn auto_focus_within(&self, root: ElementId) -> Option<ElementId> {
        self.descendants(root).into_iter().find(|id| {
            self.nodes
                .get(id)
                .is_some_and(|n| n.spec.autofocus && n.spec.accepts_programmatic_focus())
        })
    }

    fn contains(&self, root: ElementId, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == root {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(|n| n.parent);
        }
        false
    }
}

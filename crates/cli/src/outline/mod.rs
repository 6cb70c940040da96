// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ginkgo outline parsing.
//!
//! `ginkgo outline --format=json` emits a nested array of nodes. [`Outline`]
//! stores them in a single arena in pre-order, so the arena doubles as the
//! flat list and the nested forest is expressed through [`NodeId`] links.

mod ginkgo;
mod outliner;
mod source;

pub use ginkgo::{GinkgoCli, IMPORTS_NOT_FOUND_MESSAGE, is_imports_not_found, parse_major_version};
pub use outliner::{Document, Outliner};
pub use source::{DEFAULT_MAJOR_VERSION, OutlineError, OutlineSource};

use serde::Deserialize;

use crate::node::{Node, NodeId, is_excluded_kind};

/// A node as emitted by `ginkgo outline`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNode {
    pub name: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub spec: bool,
    pub focused: bool,
    pub pending: bool,
    pub nodes: Option<Vec<RawNode>>,
}

/// Parsed outline of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    /// All nodes in pre-order; `NodeId` indexes into this.
    nodes: Vec<Node>,
    /// Top-level nodes in source order.
    roots: Vec<NodeId>,
}

impl Outline {
    /// An outline with no nodes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `ginkgo outline --format=json` output.
    ///
    /// Keys depend on the Ginkgo major version: before v2, `When` containers
    /// contribute `"when <text>"` to their descendants' keys.
    pub fn from_json(input: &str, major_version: u32) -> Result<Self, serde_json::Error> {
        let raw: Vec<RawNode> = serde_json::from_str(input)?;
        Ok(Self::from_raw(raw, major_version))
    }

    /// Build an outline from already-deserialized nodes.
    pub fn from_raw(raw: Vec<RawNode>, major_version: u32) -> Self {
        let mut outline = Self::default();
        for node in raw {
            let id = outline.push(node, None, "", major_version);
            outline.roots.push(id);
        }
        outline.infer_focus();
        outline
    }

    fn push(
        &mut self,
        raw: RawNode,
        parent: Option<NodeId>,
        parent_path: &str,
        major_version: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let path = key_path(parent.is_some(), parent_path, &raw.name, &raw.text, major_version);
        self.nodes.push(Node {
            key: path.trim().to_string(),
            name: raw.name,
            text: raw.text,
            start: raw.start,
            end: raw.end,
            spec: raw.spec,
            pending: raw.pending,
            focused: raw.focused,
            explicitly_focused: raw.focused,
            parent,
            children: Vec::new(),
        });

        for child in raw.nodes.unwrap_or_default() {
            let child_id = self.push(child, Some(id), &path, major_version);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Focus everything when nothing is explicitly focused, except pending
    /// nodes of an excluded kind.
    fn infer_focus(&mut self) {
        if self.nodes.iter().any(|n| n.focused) {
            return;
        }
        for node in &mut self.nodes {
            if !(is_excluded_kind(node) && node.pending) {
                node.focused = true;
            }
        }
    }

    /// Top-level node ids.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Top-level nodes.
    pub fn nested(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().map(move |id| &self.nodes[id.0])
    }

    /// Every node in pre-order.
    pub fn flat(&self) -> &[Node] {
        &self.nodes
    }

    /// Ids of every node in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Parent of a node, if any.
    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.get(id)?.parent.and_then(|p| self.get(p))
    }

    /// Children of a node in source order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&c| (c, &self.nodes[c.0]))
    }

    /// First node carrying `key`.
    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.key == key).map(NodeId)
    }

    /// Ids of the subtree rooted at `id`, in pre-order.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the outline has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Untrimmed key path of a node given its parent's untrimmed path.
///
/// Ginkgo v1 rewrote `When("x")` to `Context("when x")`, so result names
/// from v1 runs carry the extra word.
fn key_path(
    has_parent: bool,
    parent_path: &str,
    name: &str,
    text: &str,
    major_version: u32,
) -> String {
    if major_version < 2 && name.ends_with("When") {
        return format!("{parent_path} when {text}");
    }
    if has_parent {
        return format!("{parent_path} {text}");
    }
    text.to_string()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
